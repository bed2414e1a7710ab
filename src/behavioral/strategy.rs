//! # Strategy: payment processing
//!
//! [`PaymentContext`] delegates to whichever [`PaymentStrategy`] it currently
//! holds; the strategy can be swapped at runtime.

use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Completed,
    /// Submitted, waiting for network confirmation.
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub method: &'static str,
    pub amount: f64,
    /// Masked or shortened account reference, safe to display.
    pub reference: String,
    pub status: PaymentStatus,
}

fn validate(amount: f64) -> Result<(), PaymentError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(PaymentError::InvalidAmount(amount))
    }
}

pub trait PaymentStrategy {
    fn name(&self) -> &'static str;
    fn pay(&self, amount: f64) -> Result<PaymentReceipt, PaymentError>;
}

// =============================================================================
// Strategies
// =============================================================================

pub struct CreditCardPayment {
    card_number: String,
    expiry_date: String,
}

impl CreditCardPayment {
    /// The CVV is only checked at the terminal and never stored.
    pub fn new(card_number: &str, expiry_date: &str, _cvv: &str) -> Self {
        let payment = Self {
            card_number: card_number.to_string(),
            expiry_date: expiry_date.to_string(),
        };
        info!(card = %payment.masked_number(), "initialized credit card payment");
        payment
    }

    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    /// `****-****-****-1234`
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().collect();
        let last_four: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("****-****-****-{last_four}")
    }
}

impl PaymentStrategy for CreditCardPayment {
    fn name(&self) -> &'static str {
        "CreditCard"
    }

    fn pay(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        validate(amount)?;
        let reference = self.masked_number();
        info!(amount = %format!("{amount:.2}"), card = %reference, "processed credit card payment");
        Ok(PaymentReceipt {
            method: self.name(),
            amount,
            reference,
            status: PaymentStatus::Completed,
        })
    }
}

pub struct PayPalPayment {
    email: String,
}

impl PayPalPayment {
    pub fn new(email: &str) -> Self {
        info!(email, "initialized PayPal payment");
        Self {
            email: email.to_string(),
        }
    }
}

impl PaymentStrategy for PayPalPayment {
    fn name(&self) -> &'static str {
        "PayPal"
    }

    fn pay(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        validate(amount)?;
        info!(amount = %format!("{amount:.2}"), email = %self.email, "processed PayPal payment");
        Ok(PaymentReceipt {
            method: self.name(),
            amount,
            reference: self.email.clone(),
            status: PaymentStatus::Completed,
        })
    }
}

pub struct BitcoinPayment {
    wallet_address: String,
}

impl BitcoinPayment {
    pub fn new(wallet_address: &str) -> Self {
        let payment = Self {
            wallet_address: wallet_address.to_string(),
        };
        info!(wallet = %payment.short_address(), "initialized Bitcoin payment");
        payment
    }

    /// First five and last four characters, e.g. `1A1zP...vfNa`.
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.wallet_address.chars().collect();
        if chars.len() <= 9 {
            return self.wallet_address.clone();
        }
        let head: String = chars[..5].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl PaymentStrategy for BitcoinPayment {
    fn name(&self) -> &'static str {
        "Bitcoin"
    }

    fn pay(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        validate(amount)?;
        info!(
            amount = %format!("{amount:.2}"),
            wallet = %self.wallet_address,
            "initiated Bitcoin payment, waiting for confirmation"
        );
        Ok(PaymentReceipt {
            method: self.name(),
            amount,
            reference: self.short_address(),
            status: PaymentStatus::Pending,
        })
    }
}

// =============================================================================
// Context
// =============================================================================

pub struct PaymentContext {
    strategy: Box<dyn PaymentStrategy>,
}

impl PaymentContext {
    pub fn new(strategy: Box<dyn PaymentStrategy>) -> Self {
        info!(strategy = strategy.name(), "payment context initialized");
        Self { strategy }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn PaymentStrategy>) {
        info!(
            from = self.strategy.name(),
            to = strategy.name(),
            "changing payment strategy"
        );
        self.strategy = strategy;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn process_payment(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        self.strategy.pay(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_card_masks_number() {
        let card = CreditCardPayment::new("1234567890123456", "12/25", "123");
        let receipt = card.pay(100.0).unwrap();
        assert_eq!(receipt.reference, "****-****-****-3456");
        assert_eq!(receipt.status, PaymentStatus::Completed);
        assert_eq!(card.expiry_date(), "12/25");
    }

    #[test]
    fn test_bitcoin_payment_is_pending() {
        let btc = BitcoinPayment::new("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        let receipt = btc.pay(500.0).unwrap();
        assert_eq!(receipt.status, PaymentStatus::Pending);
        assert_eq!(receipt.reference, "1A1zP...vfNa");
    }

    #[test]
    fn test_context_switches_strategy() {
        let mut context = PaymentContext::new(Box::new(PayPalPayment::new("user@example.com")));
        let receipt = context.process_payment(50.0).unwrap();
        assert_eq!(receipt.method, "PayPal");
        assert_eq!(receipt.reference, "user@example.com");

        context.set_strategy(Box::new(CreditCardPayment::new("4111111111111111", "01/30", "999")));
        assert_eq!(context.strategy_name(), "CreditCard");
        assert_eq!(context.process_payment(20.5).unwrap().amount, 20.5);
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        let context = PaymentContext::new(Box::new(PayPalPayment::new("a@b.c")));
        assert_eq!(
            context.process_payment(0.0),
            Err(PaymentError::InvalidAmount(0.0))
        );
        assert!(context.process_payment(-5.0).is_err());
        assert!(context.process_payment(f64::NAN).is_err());
    }

    #[test]
    fn test_short_card_number_masking() {
        let card = CreditCardPayment::new("12", "", "");
        assert_eq!(card.masked_number(), "****-****-****-12");
    }
}
