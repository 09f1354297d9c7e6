//! Data model leaves owned by the store

pub mod catalog;
pub mod clients;
pub mod feedback;
pub mod order;
pub mod staff;

pub use catalog::{Catalog, CatalogItem};
pub use clients::{ClientDirectory, UNKNOWN_ADDRESS};
pub use feedback::{FeedbackEntry, FeedbackLog, FEEDBACK_SEPARATOR};
pub use order::{FulfillmentQueue, Order, OrderLine};
pub use staff::{Employee, Role, Roster};
