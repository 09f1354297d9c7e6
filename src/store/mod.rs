//! PizzeriaStore - the composition root
//!
//! Owns the catalog, staff roster, client directory, fulfillment queue,
//! feedback log, admin key, and checkout, and exposes every operation the
//! (external) menu/auth/payment layers call. The store never touches disk
//! except through explicit `load`/`save`.

pub mod checkout;
pub mod fulfillment;

use tracing::debug;

use crate::model::{
    Catalog, ClientDirectory, FeedbackEntry, FeedbackLog, FulfillmentQueue, Order, Role, Roster,
};
use crate::persist::{self, LoadReport, PersistError, SaveReport, Storage};
pub use checkout::Checkout;
pub use fulfillment::{DrainReport, FulfillmentEvent};

/// Admin key a brand-new store starts with.
pub const DEFAULT_ADMIN_KEY: &str = "superadmin";

#[derive(Clone, Debug, PartialEq)]
pub struct PizzeriaStore {
    admin_key: String,
    catalog: Catalog,
    roster: Roster,
    clients: ClientDirectory,
    queue: FulfillmentQueue,
    feedback: FeedbackLog,
    checkout: Checkout,
}

impl Default for PizzeriaStore {
    fn default() -> Self {
        PizzeriaStore::new()
    }
}

impl PizzeriaStore {
    pub fn new() -> Self {
        PizzeriaStore {
            admin_key: DEFAULT_ADMIN_KEY.to_string(),
            catalog: Catalog::new(),
            roster: Roster::new(),
            clients: ClientDirectory::new(),
            queue: FulfillmentQueue::new(),
            feedback: FeedbackLog::new(),
            checkout: Checkout::new(),
        }
    }

    // ========================================================================
    // Durable lifecycle
    // ========================================================================

    /// Rebuild a store from storage. Absent or unreadable files leave their
    /// collections at defaults; a malformed file is a hard error.
    pub fn load<S: Storage>(storage: &S) -> Result<(Self, LoadReport), PersistError> {
        persist::load_store(storage)
    }

    /// Fully rewrite every collection's file. Failed writes are advisory
    /// (logged and reported), never fatal.
    pub fn save<S: Storage>(&self, storage: &S) -> SaveReport {
        persist::save_store(self, storage)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Append unconditionally - duplicate names are allowed.
    pub fn add_pizza(&mut self, name: impl Into<String>, price: f64) {
        let name = name.into();
        debug!(pizza = %name, price, "catalog add");
        self.catalog.add(name, price);
    }

    /// Remove the first catalog entry with this name. Returns whether a
    /// removal occurred.
    pub fn delete_pizza(&mut self, name: &str) -> bool {
        let removed = self.catalog.remove_first(name);
        debug!(pizza = %name, removed, "catalog delete");
        removed
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ========================================================================
    // Staff
    // ========================================================================

    pub fn add_employee(&mut self, role: Role, name: impl Into<String>) {
        let name = name.into();
        debug!(role = role.as_str(), employee = %name, "roster add");
        self.roster.add(role, name);
    }

    /// Remove by exact name from the given list. Returns whether a removal
    /// occurred.
    pub fn delete_employee(&mut self, role: Role, name: &str) -> bool {
        let removed = self.roster.remove(role, name);
        debug!(role = role.as_str(), employee = %name, removed, "roster delete");
        removed
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    // ========================================================================
    // Admin key
    // ========================================================================

    /// Overwrite unconditionally - no old-key confirmation.
    pub fn set_admin_key(&mut self, new_key: impl Into<String>) {
        self.admin_key = new_key.into();
    }

    /// Plain string compare; this is not a security-hardened system.
    pub fn is_admin_key_valid(&self, candidate: &str) -> bool {
        self.admin_key == candidate
    }

    pub(crate) fn admin_key(&self) -> &str {
        &self.admin_key
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Insert or silently overwrite the account for `login`.
    pub fn register_client(&mut self, login: impl Into<String>, password: impl Into<String>) {
        self.clients.register(login, password);
    }

    pub fn is_client_valid(&self, login: &str, password: &str) -> bool {
        self.clients.is_valid(login, password)
    }

    /// Stored address or the `"Unknown"` sentinel.
    pub fn address_for(&self, login: &str) -> &str {
        self.clients.address_for(login)
    }

    pub fn save_address(&mut self, login: impl Into<String>, address: impl Into<String>) {
        self.clients.save_address(login, address);
    }

    pub fn clients(&self) -> &ClientDirectory {
        &self.clients
    }

    pub(crate) fn clients_mut(&mut self) -> &mut ClientDirectory {
        &mut self.clients
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Push to the queue tail. No validation beyond what `Order`'s
    /// construction already guarantees - a zero-line order is legal.
    pub fn submit_order(&mut self, order: Order) {
        debug!(
            client = %order.client_name(),
            total = order.total_price(),
            "order submitted"
        );
        self.queue.push(order);
    }

    pub fn pending_orders(&self) -> usize {
        self.queue.len()
    }

    // drain_one_round lives in fulfillment.rs

    // ========================================================================
    // Checkout
    // ========================================================================

    pub fn set_discount(&mut self, modifier: f64) {
        self.checkout.set_discount(modifier);
    }

    pub fn amount_due(&self, order: &Order) -> f64 {
        self.checkout.amount_due(order)
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    pub fn leave_feedback(&mut self, client_name: impl Into<String>, text: impl Into<String>) {
        self.feedback.append(client_name, text);
    }

    pub fn feedback(&self) -> &[FeedbackEntry] {
        self.feedback.entries()
    }

    pub(crate) fn feedback_mut(&mut self) -> &mut FeedbackLog {
        &mut self.feedback
    }
}
