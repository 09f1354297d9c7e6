//! Store save/load round-trip integration tests
//!
//! Exercise the full path: store operations -> record stream encode ->
//! storage -> decode -> rebuilt store. Most tests run against the shared
//! in-memory storage; the last ones hit the real filesystem.

use pizzeria_store::model::{Order, Role, UNKNOWN_ADDRESS};
use pizzeria_store::persist::{
    self, InMemoryStorage, LoadStatus, LocalStorage, PersistError,
};
use pizzeria_store::store::{FulfillmentEvent, PizzeriaStore};

#[test]
fn test_catalog_round_trips_after_mutation_sequence() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    store.add_pizza("Margherita", 12.5);
    store.add_pizza("Pepperoni", 16.0);
    store.add_pizza("Margherita", 13.0); // duplicate by insertion
    store.delete_pizza("Margherita"); // removes the first one
    store.add_pizza("Quattro Formaggi", 18.25);
    store.save(&storage);

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    assert_eq!(reloaded.catalog().items(), store.catalog().items());

    let names: Vec<&str> = reloaded
        .catalog()
        .items()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Pepperoni", "Margherita", "Quattro Formaggi"]);
    assert_eq!(reloaded.catalog().price_of("Margherita"), Some(13.0));
}

#[test]
fn test_client_directory_round_trips_hostile_strings() {
    let storage = InMemoryStorage::new();

    // Values with embedded length-like byte runs and non-ASCII text must
    // survive the length-prefix framing untouched.
    let eight_byte_run = "\u{0008}".repeat(8);
    let mut store = PizzeriaStore::new();
    store.register_client("alice", "secret");
    store.register_client("боб", "пароль \u{1F355}");
    store.register_client(eight_byte_run.clone(), eight_byte_run.clone());
    store.save_address("alice", "1 Via Roma\n2nd floor");
    store.save_address("боб", "улица Пиццы, 42");
    store.save(&storage);

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    assert!(reloaded.is_client_valid("alice", "secret"));
    assert!(reloaded.is_client_valid("боб", "пароль \u{1F355}"));
    assert!(reloaded.is_client_valid(&eight_byte_run, &eight_byte_run));
    assert_eq!(reloaded.address_for("alice"), "1 Via Roma\n2nd floor");
    assert_eq!(reloaded.address_for("боб"), "улица Пиццы, 42");
    // Never saved one - sentinel applies after reload too.
    assert_eq!(reloaded.address_for(&eight_byte_run), UNKNOWN_ADDRESS);
}

#[test]
fn test_admin_key_round_trips() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    store.set_admin_key("molto-segreto");
    store.save(&storage);

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    assert!(reloaded.is_admin_key_valid("molto-segreto"));
    assert!(!reloaded.is_admin_key_valid("superadmin"));
}

#[test]
fn test_staff_reload_as_available() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    store.add_employee(Role::Maker, "Mario");
    store.add_employee(Role::Maker, "Giovanni");
    store.add_employee(Role::Courier, "Luigi");
    store.save(&storage);

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    let makers = reloaded.roster().list(Role::Maker);
    assert_eq!(makers.len(), 2);
    assert_eq!(makers[0].name, "Mario");
    assert!(makers.iter().all(|e| e.available));
    assert_eq!(reloaded.roster().list(Role::Courier).len(), 1);
}

#[test]
fn test_feedback_round_trips() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    store.leave_feedback("alice", "great pizza");
    store.leave_feedback("bob", "arrived cold");
    store.save(&storage);

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    assert_eq!(reloaded.feedback(), store.feedback());
}

#[test]
fn test_queue_is_not_persisted() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    let mut order = Order::new("alice", "1 Via Roma");
    order.add_line("Margherita", 12.5, 1);
    store.submit_order(order);
    store.save(&storage);

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    assert_eq!(reloaded.pending_orders(), 0);
}

#[test]
fn test_partial_data_dir_loads_what_exists() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    store.add_pizza("Margherita", 12.5);
    store.register_client("alice", "secret");
    store.save(&storage);

    // Lose two files; the rest still load.
    storage.remove(persist::ACCOUNTS_FILE);
    storage.remove(persist::ADMIN_KEY_FILE);

    let (reloaded, report) = PizzeriaStore::load(&storage).unwrap();
    assert_eq!(
        report.status(persist::ACCOUNTS_FILE),
        Some(&LoadStatus::Absent)
    );
    assert_eq!(report.status(persist::CATALOG_FILE), Some(&LoadStatus::Loaded(1)));
    assert!(!reloaded.is_client_valid("alice", "secret"));
    assert!(reloaded.is_admin_key_valid("superadmin"));
    assert_eq!(reloaded.catalog().len(), 1);
}

#[test]
fn test_corrupt_file_fails_load_where_absent_does_not() {
    let storage = InMemoryStorage::new();
    PizzeriaStore::new().save(&storage);

    // Replace the client accounts with a stream truncated mid-count.
    storage.inject(persist::ACCOUNTS_FILE, vec![0x02, 0x00, 0x00, 0x00]);

    let err = PizzeriaStore::load(&storage).unwrap_err();
    assert!(matches!(
        err,
        PersistError::Corrupt {
            file: persist::ACCOUNTS_FILE,
            ..
        }
    ));

    // The same file absent is fine.
    storage.remove(persist::ACCOUNTS_FILE);
    assert!(PizzeriaStore::load(&storage).is_ok());
}

#[test]
fn test_drain_after_reload_uses_persisted_staff() {
    let storage = InMemoryStorage::new();

    let mut store = PizzeriaStore::new();
    store.add_pizza("Margherita", 12.5);
    store.add_employee(Role::Maker, "Mario");
    store.add_employee(Role::Courier, "Luigi");
    store.save(&storage);

    let (mut reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    let mut order = Order::new("alice", "1 Via Roma");
    let price = reloaded.catalog().price_of("Margherita").unwrap();
    order.add_line("Margherita", price, 2);
    assert_eq!(order.total_price(), 25.0);
    reloaded.submit_order(order);

    let report = reloaded.drain_one_round();
    assert_eq!(report.completed, 1);
    assert!(report.events.contains(&FulfillmentEvent::CourierDelivered {
        courier: "Luigi".to_string(),
        client: "alice".to_string(),
        address: "1 Via Roma".to_string(),
    }));
    assert_eq!(reloaded.pending_orders(), 0);
}

// ============================================================================
// Real filesystem
// ============================================================================

#[test]
fn test_full_round_trip_on_local_storage() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("data")).unwrap();

    let mut store = PizzeriaStore::new();
    store.set_admin_key("chiave");
    store.add_pizza("Margherita", 12.5);
    store.add_pizza("Capricciosa", 17.0);
    store.add_employee(Role::Maker, "Mario");
    store.add_employee(Role::Courier, "Luigi");
    store.register_client("alice", "secret");
    store.save_address("alice", "1 Via Roma");
    store.leave_feedback("alice", "perfetto");

    let save_report = store.save(&storage);
    assert!(save_report.all_written());

    let (reloaded, _) = PizzeriaStore::load(&storage).unwrap();
    assert!(reloaded.is_admin_key_valid("chiave"));
    assert_eq!(reloaded.catalog().items(), store.catalog().items());
    assert_eq!(reloaded.roster(), store.roster());
    assert_eq!(reloaded.clients(), store.clients());
    assert_eq!(reloaded.feedback(), store.feedback());
}

#[test]
fn test_fresh_data_dir_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("never-saved")).unwrap();

    let (store, report) = PizzeriaStore::load(&storage).unwrap();
    assert!(store.catalog().is_empty());
    assert!(store.is_admin_key_valid("superadmin"));
    assert!(report
        .files
        .iter()
        .all(|(_, status)| *status == LoadStatus::Absent));
}
