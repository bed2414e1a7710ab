use anyhow::Result;
use colored::Colorize;
use design_patterns::behavioral::strategy::{BitcoinPayment, CreditCardPayment, PayPalPayment, PaymentContext};
use design_patterns::logging;

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Strategy: payment processing ===".bold());

    let mut context = PaymentContext::new(Box::new(CreditCardPayment::new("1234567890123456", "12/25", "123")));
    let receipt = context.process_payment(100.0)?;
    println!("{} {:.2} via {} ({})", "paid".green(), receipt.amount, receipt.method, receipt.reference);

    context.set_strategy(Box::new(PayPalPayment::new("user@example.com")));
    let receipt = context.process_payment(50.25)?;
    println!("{} {:.2} via {} ({})", "paid".green(), receipt.amount, receipt.method, receipt.reference);

    context.set_strategy(Box::new(BitcoinPayment::new("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")));
    let receipt = context.process_payment(500.0)?;
    println!(
        "{} {:.2} via {} ({}) status {:?}",
        "submitted".yellow(),
        receipt.amount,
        receipt.method,
        receipt.reference,
        receipt.status
    );

    if let Err(err) = context.process_payment(-10.0) {
        println!("{} {err}", "rejected".red());
    }
    Ok(())
}
