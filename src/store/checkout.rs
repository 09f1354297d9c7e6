//! Checkout - payable amount with the current discount

use crate::model::Order;

/// Computes the amount due for an order. The interactive payment dialogue
/// (cash vs card) lives in the UI layer; only the price math is here.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkout {
    discount_modifier: f64,
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout {
            discount_modifier: 1.0,
        }
    }
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    /// Set the multiplier applied to order totals (bonus card sets 0.5).
    pub fn set_discount(&mut self, modifier: f64) {
        self.discount_modifier = modifier;
    }

    pub fn discount(&self) -> f64 {
        self.discount_modifier
    }

    pub fn amount_due(&self, order: &Order) -> f64 {
        order.total_price() * self.discount_modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_discount_by_default() {
        let mut order = Order::new("alice", "1 Via Roma");
        order.add_line("Margherita", 12.5, 2);

        assert_eq!(Checkout::new().amount_due(&order), 25.0);
    }

    #[test]
    fn test_bonus_card_halves_the_total() {
        let mut order = Order::new("alice", "1 Via Roma");
        order.add_line("Margherita", 12.5, 2);
        order.add_line("Pepperoni", 16.0, 1);

        let mut checkout = Checkout::new();
        checkout.set_discount(0.5);
        assert_eq!(checkout.amount_due(&order), 20.5);
    }
}
