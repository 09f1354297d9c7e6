//! Orders and the fulfillment queue
//!
//! An order snapshots line prices from the catalog at build time; later
//! catalog price changes never retroactively affect queued or historical
//! orders. Once submitted, an order only ever moves through the queue.

use std::collections::VecDeque;

/// One line item. The unit price is the catalog price at the moment the
/// order was built, not a live reference.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub pizza_name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Order {
    client_name: String,
    delivery_address: String,
    lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(client_name: impl Into<String>, delivery_address: impl Into<String>) -> Self {
        Order {
            client_name: client_name.into(),
            delivery_address: delivery_address.into(),
            lines: Vec::new(),
        }
    }

    /// Add a line item. A quantity of zero is clamped to one; every line
    /// carries at least one pizza.
    pub fn add_line(&mut self, pizza_name: impl Into<String>, unit_price: f64, quantity: u32) {
        self.lines.push(OrderLine {
            pizza_name: pizza_name.into(),
            unit_price,
            quantity: quantity.max(1),
        });

        debug_assert!(
            self.lines.iter().all(|l| l.quantity >= 1),
            "Invariant violated: every order line carries quantity >= 1"
        );
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of unit_price * quantity over all lines. An order with zero
    /// lines is legal and totals 0.
    pub fn total_price(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * f64::from(l.quantity))
            .sum()
    }
}

/// Strict FIFO of submitted orders awaiting staff assignment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FulfillmentQueue {
    orders: VecDeque<Order>,
}

impl FulfillmentQueue {
    pub fn new() -> Self {
        FulfillmentQueue {
            orders: VecDeque::new(),
        }
    }

    pub fn push(&mut self, order: Order) {
        #[cfg(debug_assertions)]
        let pre_len = self.orders.len();

        self.orders.push_back(order);

        #[cfg(debug_assertions)]
        {
            debug_assert_eq!(
                self.orders.len(),
                pre_len + 1,
                "Postcondition violated: len must increase by 1 after push"
            );
        }
    }

    /// Remove and return the oldest submitted order.
    pub fn pop(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price() {
        let mut order = Order::new("alice", "1 Via Roma");
        order.add_line("Margherita", 12.5, 2);
        order.add_line("Pepperoni", 16.0, 1);

        assert_eq!(order.total_price(), 41.0);
    }

    #[test]
    fn test_empty_order_is_legal_and_free() {
        let order = Order::new("alice", "1 Via Roma");
        assert!(order.lines().is_empty());
        assert_eq!(order.total_price(), 0.0);
    }

    #[test]
    fn test_zero_quantity_clamps_to_one() {
        let mut order = Order::new("alice", "1 Via Roma");
        order.add_line("Margherita", 12.5, 0);

        assert_eq!(order.lines()[0].quantity, 1);
        assert_eq!(order.total_price(), 12.5);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = FulfillmentQueue::new();
        queue.push(Order::new("alice", "a"));
        queue.push(Order::new("bob", "b"));

        assert_eq!(queue.pop().unwrap().client_name(), "alice");
        assert_eq!(queue.pop().unwrap().client_name(), "bob");
        assert!(queue.pop().is_none());
    }
}
