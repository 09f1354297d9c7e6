//! Pizzeria store smoke binary
//!
//! Non-interactive: loads the store from the configured data directory,
//! logs a summary, drains anything queued, and saves back. The interactive
//! menu/auth/payment front end is a separate collaborator and drives the
//! same library operations.
//!
//! Configuration: `PIZZERIA_CONFIG` names a TOML file (default
//! `pizzeria.toml`, missing file means defaults); `data_dir` inside it
//! names the record stream directory.

use std::path::PathBuf;

use pizzeria_store::config::StoreConfig;
use pizzeria_store::persist::LocalStorage;
use pizzeria_store::store::PizzeriaStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path =
        std::env::var("PIZZERIA_CONFIG").unwrap_or_else(|_| "pizzeria.toml".to_string());
    let config = StoreConfig::from_file(&PathBuf::from(&config_path))?;
    info!(config = %config_path, data_dir = %config.data_dir.display(), "starting");

    let storage = LocalStorage::new(config.data_dir.clone())?;
    let (mut store, load_report) = PizzeriaStore::load(&storage)?;
    for (file, status) in &load_report.files {
        info!(file, ?status, "load");
    }

    info!(
        pizzas = store.catalog().len(),
        makers = store.roster().list(pizzeria_store::Role::Maker).len(),
        couriers = store.roster().list(pizzeria_store::Role::Courier).len(),
        clients = store.clients().accounts().len(),
        reviews = store.feedback().len(),
        "store loaded"
    );

    // The queue is in-memory only, so this is a no-op on a fresh boot;
    // it is here so scripted callers can submit and drain in one run.
    let drained = store.drain_one_round();
    if drained.completed > 0 || drained.dropped > 0 {
        info!(
            completed = drained.completed,
            dropped = drained.dropped,
            "drained pending orders"
        );
    }

    let save_report = store.save(&storage);
    if !save_report.all_written() {
        for (file, error) in &save_report.failed {
            warn!(file, error = %error, "not persisted");
        }
    }
    info!(files = save_report.written.len(), "saved");

    Ok(())
}
