//! # State: order processing
//!
//! [`Order`] forwards every action to its current state object. Each state
//! either allows the action (possibly moving the order to another state) or
//! rejects it with a reason. A rejected action never changes the order.
//!
//! ```text
//! NewOrder --pay--> PendingPayment --ship--> Shipped --deliver--> Delivered
//!     |                  |
//!     +----cancel--------+------> Cancelled
//! ```

use std::fmt;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddItem,
    ProcessPayment,
    Ship,
    Deliver,
    Cancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::AddItem => "add items",
            Action::ProcessPayment => "process payment",
            Action::Ship => "ship",
            Action::Deliver => "deliver",
            Action::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Cannot {action}: {reason}")]
    Rejected {
        action: Action,
        state: &'static str,
        reason: &'static str,
    },
}

fn reject(action: Action, state: &'static str, reason: &'static str) -> Transition {
    Err(OrderError::Rejected {
        action,
        state,
        reason,
    })
}

/// `Ok(None)` keeps the current state, `Ok(Some(_))` moves to a new one.
pub type Transition = Result<Option<Box<dyn OrderState>>, OrderError>;

pub trait OrderState: fmt::Debug {
    fn name(&self) -> &'static str;
    fn add_item(&self, items: &mut Vec<String>, item: String) -> Transition;
    fn process_payment(&self, items: &[String]) -> Transition;
    fn ship(&self) -> Transition;
    fn deliver(&self) -> Transition;
    fn cancel(&self) -> Transition;
}

// =============================================================================
// Concrete states
// =============================================================================

#[derive(Debug)]
pub struct NewOrder;

/// Payment has been taken; the order waits for shipment.
#[derive(Debug)]
pub struct PendingPayment;

#[derive(Debug)]
pub struct Shipped;

#[derive(Debug)]
pub struct Delivered;

#[derive(Debug)]
pub struct Cancelled;

impl OrderState for NewOrder {
    fn name(&self) -> &'static str {
        "NewOrder"
    }

    fn add_item(&self, items: &mut Vec<String>, item: String) -> Transition {
        info!(%item, "adding item to the order");
        items.push(item);
        Ok(None)
    }

    fn process_payment(&self, items: &[String]) -> Transition {
        if items.is_empty() {
            return reject(Action::ProcessPayment, self.name(), "Order is empty.");
        }
        info!(items = items.len(), "payment successful");
        Ok(Some(Box::new(PendingPayment)))
    }

    fn ship(&self) -> Transition {
        reject(Action::Ship, self.name(), "Order payment not processed yet.")
    }

    fn deliver(&self) -> Transition {
        reject(Action::Deliver, self.name(), "Order not shipped yet.")
    }

    fn cancel(&self) -> Transition {
        info!("cancelling the new order");
        Ok(Some(Box::new(Cancelled)))
    }
}

impl OrderState for PendingPayment {
    fn name(&self) -> &'static str {
        "PendingPayment"
    }

    fn add_item(&self, _items: &mut Vec<String>, _item: String) -> Transition {
        reject(Action::AddItem, self.name(), "Order payment has been processed.")
    }

    fn process_payment(&self, _items: &[String]) -> Transition {
        reject(Action::ProcessPayment, self.name(), "Payment already processed.")
    }

    fn ship(&self) -> Transition {
        info!("order shipped");
        Ok(Some(Box::new(Shipped)))
    }

    fn deliver(&self) -> Transition {
        reject(Action::Deliver, self.name(), "Order not shipped yet.")
    }

    fn cancel(&self) -> Transition {
        info!("cancelling the order, refunding payment");
        Ok(Some(Box::new(Cancelled)))
    }
}

impl OrderState for Shipped {
    fn name(&self) -> &'static str {
        "Shipped"
    }

    fn add_item(&self, _items: &mut Vec<String>, _item: String) -> Transition {
        reject(Action::AddItem, self.name(), "Order has been shipped.")
    }

    fn process_payment(&self, _items: &[String]) -> Transition {
        reject(Action::ProcessPayment, self.name(), "Payment already processed.")
    }

    fn ship(&self) -> Transition {
        reject(Action::Ship, self.name(), "Order already shipped.")
    }

    fn deliver(&self) -> Transition {
        info!("order delivered");
        Ok(Some(Box::new(Delivered)))
    }

    fn cancel(&self) -> Transition {
        reject(Action::Cancel, self.name(), "Order has already been shipped.")
    }
}

impl OrderState for Delivered {
    fn name(&self) -> &'static str {
        "Delivered"
    }

    fn add_item(&self, _items: &mut Vec<String>, _item: String) -> Transition {
        reject(Action::AddItem, self.name(), "Order has been delivered.")
    }

    fn process_payment(&self, _items: &[String]) -> Transition {
        reject(Action::ProcessPayment, self.name(), "Payment already processed.")
    }

    fn ship(&self) -> Transition {
        reject(Action::Ship, self.name(), "Order already shipped and delivered.")
    }

    fn deliver(&self) -> Transition {
        reject(Action::Deliver, self.name(), "Order already delivered.")
    }

    fn cancel(&self) -> Transition {
        reject(Action::Cancel, self.name(), "Order has already been delivered.")
    }
}

impl OrderState for Cancelled {
    fn name(&self) -> &'static str {
        "Cancelled"
    }

    fn add_item(&self, _items: &mut Vec<String>, _item: String) -> Transition {
        reject(Action::AddItem, self.name(), "Order is cancelled.")
    }

    fn process_payment(&self, _items: &[String]) -> Transition {
        reject(Action::ProcessPayment, self.name(), "Order is cancelled.")
    }

    fn ship(&self) -> Transition {
        reject(Action::Ship, self.name(), "Order is cancelled.")
    }

    fn deliver(&self) -> Transition {
        reject(Action::Deliver, self.name(), "Order is cancelled.")
    }

    fn cancel(&self) -> Transition {
        reject(Action::Cancel, self.name(), "Order is already cancelled.")
    }
}

// =============================================================================
// Context
// =============================================================================

#[derive(Debug)]
pub struct Order {
    order_id: String,
    items: Vec<String>,
    state: Box<dyn OrderState>,
}

impl Order {
    pub fn new(order_id: impl Into<String>) -> Self {
        let order = Self {
            order_id: order_id.into(),
            items: Vec::new(),
            state: Box::new(NewOrder),
        };
        info!(order_id = %order.order_id, state = order.state_name(), "order created");
        order
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    fn apply(&mut self, transition: Transition) -> Result<(), OrderError> {
        if let Some(next) = transition? {
            info!(
                order_id = %self.order_id,
                from = self.state.name(),
                to = next.name(),
                "transitioning"
            );
            self.state = next;
        }
        Ok(())
    }

    pub fn add_item(&mut self, item: impl Into<String>) -> Result<(), OrderError> {
        let transition = self.state.add_item(&mut self.items, item.into());
        self.apply(transition)
    }

    pub fn process_payment(&mut self) -> Result<(), OrderError> {
        let transition = self.state.process_payment(&self.items);
        self.apply(transition)
    }

    pub fn ship(&mut self) -> Result<(), OrderError> {
        let transition = self.state.ship();
        self.apply(transition)
    }

    pub fn deliver(&mut self) -> Result<(), OrderError> {
        let transition = self.state.deliver();
        self.apply(transition)
    }

    pub fn cancel(&mut self) -> Result<(), OrderError> {
        let transition = self.state.cancel();
        self.apply(transition)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order [ID: {}, State: {}, Items: {:?}]",
            self.order_id,
            self.state_name(),
            self.items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paid_order() -> Order {
        let mut order = Order::new("ORD-1");
        order.add_item("Laptop").unwrap();
        order.process_payment().unwrap();
        order
    }

    #[test]
    fn test_happy_path() {
        let mut order = Order::new("ORD-1");
        assert_eq!(order.state_name(), "NewOrder");

        order.add_item("Laptop").unwrap();
        order.add_item("Mouse").unwrap();
        order.process_payment().unwrap();
        assert_eq!(order.state_name(), "PendingPayment");

        order.ship().unwrap();
        assert_eq!(order.state_name(), "Shipped");

        order.deliver().unwrap();
        assert_eq!(order.state_name(), "Delivered");
        assert_eq!(order.items(), ["Laptop", "Mouse"]);
    }

    #[test]
    fn test_cannot_pay_for_empty_order() {
        let mut order = Order::new("ORD-2");
        let err = order.process_payment().unwrap_err();
        assert_eq!(err.to_string(), "Cannot process payment: Order is empty.");
        assert_eq!(order.state_name(), "NewOrder");
    }

    #[test]
    fn test_cannot_add_items_after_payment() {
        let mut order = paid_order();
        assert!(order.add_item("Keyboard").is_err());
        assert_eq!(order.items(), ["Laptop"]);
        assert_eq!(order.state_name(), "PendingPayment");
    }

    #[test]
    fn test_cancel_rules() {
        let mut fresh = Order::new("ORD-3");
        fresh.cancel().unwrap();
        assert_eq!(fresh.state_name(), "Cancelled");
        assert!(fresh.cancel().is_err());

        let mut paid = paid_order();
        paid.cancel().unwrap();
        assert_eq!(paid.state_name(), "Cancelled");

        let mut shipped = paid_order();
        shipped.ship().unwrap();
        let err = shipped.cancel().unwrap_err();
        assert_eq!(
            err,
            OrderError::Rejected {
                action: Action::Cancel,
                state: "Shipped",
                reason: "Order has already been shipped.",
            }
        );
    }

    #[test]
    fn test_out_of_order_actions_are_rejected() {
        let mut order = Order::new("ORD-4");
        assert!(order.ship().is_err());
        assert!(order.deliver().is_err());

        let mut order = paid_order();
        assert!(order.deliver().is_err());
        assert!(order.process_payment().is_err());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        let mut order = paid_order();
        order.ship().unwrap();
        order.deliver().unwrap();

        assert!(order.add_item("x").is_err());
        assert!(order.process_payment().is_err());
        assert!(order.ship().is_err());
        assert!(order.deliver().is_err());
        assert!(order.cancel().is_err());
        assert_eq!(order.state_name(), "Delivered");
    }

    #[test]
    fn test_display() {
        let order = paid_order();
        assert_eq!(
            order.to_string(),
            r#"Order [ID: ORD-1, State: PendingPayment, Items: ["Laptop"]]"#
        );
    }
}
