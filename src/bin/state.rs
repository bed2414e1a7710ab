use colored::Colorize;
use design_patterns::behavioral::state::{Order, OrderError};
use design_patterns::logging;

fn report(step: &str, result: Result<(), OrderError>) {
    match result {
        Ok(()) => println!("  {} {step}", "ok".green()),
        Err(err) => println!("  {} {step}: {err}", "rejected".red()),
    }
}

fn main() {
    logging::init();
    println!("{}", "=== State: order processing ===".bold());

    let mut order = Order::new("ORD-001");
    report("add laptop", order.add_item("Laptop"));
    report("add mouse", order.add_item("Mouse"));
    report("pay", order.process_payment());
    report("add item after payment", order.add_item("Keyboard"));
    report("ship", order.ship());
    report("cancel shipped order", order.cancel());
    report("deliver", order.deliver());
    println!("{order}");

    let mut empty = Order::new("ORD-002");
    report("pay empty order", empty.process_payment());
    report("cancel", empty.cancel());
    report("ship cancelled order", empty.ship());
    println!("{empty}");
}
