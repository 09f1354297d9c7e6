//! Durable save/load of the whole store
//!
//! One record stream per collection (see `codec`), one file per stream,
//! all behind the `Storage` trait (see `storage`). Saving truncates and
//! fully rewrites every file. Loading is per-file:
//!
//! - absent file: the collection keeps its default, not an error
//! - empty file: nothing to load
//! - unreadable file: advisory - warn, keep the prior value, continue
//! - malformed non-empty file: hard `PersistError::Corrupt`

pub mod codec;
pub mod storage;

use tracing::{debug, warn};

use crate::model::Role;
use crate::store::PizzeriaStore;
use codec::{
    decode_admin_key, decode_catalog, decode_feedback, decode_names, decode_string_map,
    encode_admin_key, encode_catalog, encode_feedback, encode_names, encode_string_map,
};
pub use storage::{InMemoryStorage, LocalStorage, PersistError, Storage};

pub const ADMIN_KEY_FILE: &str = "AdminKey.bin";
pub const CATALOG_FILE: &str = "PizzaCatalogue.bin";
pub const MAKERS_FILE: &str = "WorkersDB.bin";
pub const COURIERS_FILE: &str = "DeliveryManDB.bin";
pub const ACCOUNTS_FILE: &str = "ClientData.bin";
pub const ADDRESSES_FILE: &str = "ClientAddresses.bin";
pub const FEEDBACK_FILE: &str = "Reviews.bin";

/// Per-file outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Decoded this many records (1 for the admin key)
    Loaded(usize),
    /// File does not exist - collection left at its default
    Absent,
    /// File exists but is empty - nothing to load
    Empty,
    /// File could not be read - collection left at its default
    Unreadable(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub files: Vec<(&'static str, LoadStatus)>,
}

impl LoadReport {
    pub fn status(&self, file: &str) -> Option<&LoadStatus> {
        self.files.iter().find(|(f, _)| *f == file).map(|(_, s)| s)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    pub written: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl SaveReport {
    pub fn all_written(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Read one file and hand its bytes to a decode closure. Absence and
/// unreadability never decode; corruption inside the closure is hard.
fn load_file<S: Storage>(
    storage: &S,
    file: &'static str,
    report: &mut LoadReport,
    mut apply: impl FnMut(&[u8]) -> Result<usize, codec::CodecError>,
) -> Result<(), PersistError> {
    match storage.read(file) {
        Ok(None) => {
            debug!(file, "no saved data, keeping defaults");
            report.files.push((file, LoadStatus::Absent));
            Ok(())
        }
        Ok(Some(data)) if data.is_empty() => {
            debug!(file, "empty file, nothing to load");
            report.files.push((file, LoadStatus::Empty));
            Ok(())
        }
        Ok(Some(data)) => {
            let records = apply(&data).map_err(|source| PersistError::Corrupt { file, source })?;
            debug!(file, records, "loaded");
            report.files.push((file, LoadStatus::Loaded(records)));
            Ok(())
        }
        Err(e) => {
            warn!(file, error = %e, "file unreadable, keeping defaults");
            report.files.push((file, LoadStatus::Unreadable(e.to_string())));
            Ok(())
        }
    }
}

/// Rebuild a store from disk. Returns the store and a per-file report;
/// the only hard failure is a corrupt (malformed, non-empty) file.
pub fn load_store<S: Storage>(storage: &S) -> Result<(PizzeriaStore, LoadReport), PersistError> {
    let mut store = PizzeriaStore::new();
    let mut report = LoadReport::default();

    load_file(storage, ADMIN_KEY_FILE, &mut report, |data| {
        store.set_admin_key(decode_admin_key(data)?);
        Ok(1)
    })?;

    load_file(storage, CATALOG_FILE, &mut report, |data| {
        let items = decode_catalog(data)?;
        let count = items.len();
        for item in items {
            store.add_pizza(item.name, item.unit_price);
        }
        Ok(count)
    })?;

    load_file(storage, MAKERS_FILE, &mut report, |data| {
        let names = decode_names(data)?;
        let count = names.len();
        for name in names {
            store.add_employee(Role::Maker, name);
        }
        Ok(count)
    })?;

    load_file(storage, COURIERS_FILE, &mut report, |data| {
        let names = decode_names(data)?;
        let count = names.len();
        for name in names {
            store.add_employee(Role::Courier, name);
        }
        Ok(count)
    })?;

    load_file(storage, ACCOUNTS_FILE, &mut report, |data| {
        let accounts = decode_string_map(data)?;
        let count = accounts.len();
        store.clients_mut().replace_accounts(accounts);
        Ok(count)
    })?;

    load_file(storage, ADDRESSES_FILE, &mut report, |data| {
        let addresses = decode_string_map(data)?;
        let count = addresses.len();
        store.clients_mut().replace_addresses(addresses);
        Ok(count)
    })?;

    load_file(storage, FEEDBACK_FILE, &mut report, |data| {
        let entries = decode_feedback(data)?;
        let count = entries.len();
        store.feedback_mut().replace(entries);
        Ok(count)
    })?;

    Ok((store, report))
}

fn save_file<S: Storage>(
    storage: &S,
    file: &'static str,
    data: &[u8],
    report: &mut SaveReport,
) {
    match storage.write(file, data) {
        Ok(()) => report.written.push(file),
        Err(e) => {
            // Advisory only: keep writing the remaining files.
            warn!(file, error = %e, "failed to write, collection not persisted");
            report.failed.push((file, e.to_string()));
        }
    }
}

/// Persist every collection, fully rewriting each file. A failed write is
/// logged and reported but never aborts the remaining files.
pub fn save_store<S: Storage>(store: &PizzeriaStore, storage: &S) -> SaveReport {
    let mut report = SaveReport::default();

    save_file(storage, ADMIN_KEY_FILE, &encode_admin_key(store.admin_key()), &mut report);
    save_file(storage, CATALOG_FILE, &encode_catalog(store.catalog()), &mut report);
    save_file(
        storage,
        MAKERS_FILE,
        &encode_names(store.roster().list(Role::Maker).iter().map(|e| e.name.as_str())),
        &mut report,
    );
    save_file(
        storage,
        COURIERS_FILE,
        &encode_names(store.roster().list(Role::Courier).iter().map(|e| e.name.as_str())),
        &mut report,
    );
    save_file(
        storage,
        ACCOUNTS_FILE,
        &encode_string_map(store.clients().accounts()),
        &mut report,
    );
    save_file(
        storage,
        ADDRESSES_FILE,
        &encode_string_map(store.clients().addresses()),
        &mut report,
    );
    save_file(storage, FEEDBACK_FILE, &encode_feedback(store.feedback()), &mut report);

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_empty_storage_is_all_defaults() {
        let storage = InMemoryStorage::new();
        let (store, report) = load_store(&storage).unwrap();

        assert!(store.is_admin_key_valid("superadmin"));
        assert!(store.catalog().is_empty());
        assert_eq!(report.status(CATALOG_FILE), Some(&LoadStatus::Absent));
        assert_eq!(report.status(ADMIN_KEY_FILE), Some(&LoadStatus::Absent));
    }

    #[test]
    fn test_empty_file_is_nothing_to_load() {
        let storage = InMemoryStorage::new();
        storage.inject(CATALOG_FILE, Vec::new());

        let (store, report) = load_store(&storage).unwrap();
        assert!(store.catalog().is_empty());
        assert_eq!(report.status(CATALOG_FILE), Some(&LoadStatus::Empty));
    }

    #[test]
    fn test_corrupt_file_is_hard_error() {
        let storage = InMemoryStorage::new();
        // Claims one record, then ends.
        storage.inject(CATALOG_FILE, 1u64.to_le_bytes().to_vec());

        let err = load_store(&storage).unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { file: CATALOG_FILE, .. }));
    }

    #[test]
    fn test_save_writes_every_file() {
        let storage = InMemoryStorage::new();
        let store = PizzeriaStore::new();

        let report = save_store(&store, &storage);
        assert!(report.all_written());
        assert_eq!(report.written.len(), 7);
        assert!(storage.exists(ADMIN_KEY_FILE));
        assert!(storage.exists(FEEDBACK_FILE));
    }
}
