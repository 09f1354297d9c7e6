pub mod config;
pub mod model;
pub mod persist;
pub mod store;

pub use config::StoreConfig;
pub use model::{Catalog, CatalogItem, Employee, Order, OrderLine, Role, UNKNOWN_ADDRESS};
pub use persist::{InMemoryStorage, LoadReport, LocalStorage, PersistError, SaveReport, Storage};
pub use store::{DrainReport, FulfillmentEvent, PizzeriaStore, DEFAULT_ADMIN_KEY};
