use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::adapter::{ApplicationService, LoggerAdapter, VendorLogger};

fn main() {
    logging::init();
    println!("{}", "=== Adapter: logging adapter ===".bold());

    let service = ApplicationService::new(LoggerAdapter::new(VendorLogger));
    for data in ["ImportantData123", "abc", ""] {
        println!("\n{} {data:?}", "perform_operation".cyan());
        match service.perform_operation(data) {
            Ok(()) => println!("  {}", "completed".green()),
            Err(err) => println!("  {} {err}", "failed".red()),
        }
    }
}
