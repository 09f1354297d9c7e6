//! Fulfillment - draining queued orders against available staff
//!
//! One round scans staff per order, first-available-by-list-order (a
//! deterministic, non-load-balancing policy, O(orders x staff)). Each
//! employee takes at most one order per round: they are marked unavailable
//! when they take one and every flag is restored when the round ends, so
//! availability is true before and after the round for everyone.
//!
//! An order whose turn comes when no maker is free is still dequeued and
//! silently dropped: the queue head is popped once per staff scan whether
//! or not anyone was assigned. Long-standing, documented behavior - kept
//! observable through `DrainReport` rather than quietly changed.

use tracing::{info, warn};

use super::PizzeriaStore;
use crate::model::Role;

/// One observable side effect of a drain round. The drain has no error
/// return; these events (and the mirrored `tracing` output) are the only
/// way to see what happened to an order.
#[derive(Clone, Debug, PartialEq)]
pub enum FulfillmentEvent {
    /// A maker took the order and ran its work step.
    MakerWorked { maker: String, client: String },
    /// A courier ran a delivery step for the order.
    CourierDelivered {
        courier: String,
        client: String,
        address: String,
    },
    /// No maker was free; the order was dequeued without being worked.
    DroppedNoMaker { client: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrainReport {
    /// Orders that got a maker step
    pub completed: usize,
    /// Orders dequeued with no free maker
    pub dropped: usize,
    pub events: Vec<FulfillmentEvent>,
}

impl PizzeriaStore {
    /// Drain the queue: one order consumed per staff scan, until empty.
    pub fn drain_one_round(&mut self) -> DrainReport {
        self.roster.verify_all_available();

        let mut report = DrainReport::default();

        while let Some(order) = self.queue.pop() {
            let client = order.client_name().to_string();

            match self.roster.first_available(Role::Maker) {
                Some(idx) => {
                    let maker = self
                        .roster
                        .get_mut(Role::Maker, idx)
                        .expect("first_available returned a valid index");
                    maker.available = false;
                    let maker_name = maker.name.clone();
                    info!(maker = %maker_name, client = %client, "maker working");
                    info!(maker = %maker_name, "maker finished");

                    report.events.push(FulfillmentEvent::MakerWorked {
                        maker: maker_name,
                        client: client.clone(),
                    });
                    report.completed += 1;
                }
                None => {
                    // The documented drop: dequeued, never worked.
                    warn!(client = %client, "no maker free, order dropped");
                    report
                        .events
                        .push(FulfillmentEvent::DroppedNoMaker { client });
                    report.dropped += 1;
                    continue;
                }
            }

            if let Some(idx) = self.roster.first_available(Role::Courier) {
                let courier = self
                    .roster
                    .get_mut(Role::Courier, idx)
                    .expect("first_available returned a valid index");
                courier.available = false;
                let courier_name = courier.name.clone();
                info!(
                    courier = %courier_name,
                    client = %client,
                    address = %order.delivery_address(),
                    "courier delivering"
                );

                report.events.push(FulfillmentEvent::CourierDelivered {
                    courier: courier_name,
                    client,
                    address: order.delivery_address().to_string(),
                });
            }
        }

        // The round is over: everyone who took an order is free again.
        self.roster.restore_all_available();
        self.roster.verify_all_available();

        report
    }
}
