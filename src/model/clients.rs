//! Client directory - login credentials and saved delivery addresses
//!
//! Two separate maps keyed by login. An address is optional; lookups fall
//! back to the `UNKNOWN_ADDRESS` sentinel. Registration upserts: a second
//! `register` for the same login silently overwrites the stored password
//! (documented behavior, not a bug to fix here).

use std::collections::HashMap;

/// Placeholder returned when a client has never saved an address.
pub const UNKNOWN_ADDRESS: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientDirectory {
    accounts: HashMap<String, String>,
    addresses: HashMap<String, String>,
}

impl ClientDirectory {
    pub fn new() -> Self {
        ClientDirectory::default()
    }

    /// Insert or silently overwrite the credentials for `login`.
    pub fn register(&mut self, login: impl Into<String>, password: impl Into<String>) {
        self.accounts.insert(login.into(), password.into());
    }

    /// True iff an account exists for `login` with exactly this password.
    /// Plain string compare - this is not a security-hardened system.
    pub fn is_valid(&self, login: &str, password: &str) -> bool {
        self.accounts.get(login).is_some_and(|p| p == password)
    }

    /// Stored delivery address, or the `"Unknown"` sentinel.
    pub fn address_for(&self, login: &str) -> &str {
        self.addresses
            .get(login)
            .map_or(UNKNOWN_ADDRESS, String::as_str)
    }

    /// Upsert the last-used delivery address for `login`.
    pub fn save_address(&mut self, login: impl Into<String>, address: impl Into<String>) {
        self.addresses.insert(login.into(), address.into());
    }

    pub fn accounts(&self) -> &HashMap<String, String> {
        &self.accounts
    }

    pub fn addresses(&self) -> &HashMap<String, String> {
        &self.addresses
    }

    pub(crate) fn replace_accounts(&mut self, accounts: HashMap<String, String>) {
        self.accounts = accounts;
    }

    pub(crate) fn replace_addresses(&mut self, addresses: HashMap<String, String>) {
        self.addresses = addresses;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_validate() {
        let mut dir = ClientDirectory::new();
        dir.register("alice", "secret");

        assert!(dir.is_valid("alice", "secret"));
        assert!(!dir.is_valid("alice", "wrong"));
        assert!(!dir.is_valid("bob", "secret"));
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut dir = ClientDirectory::new();
        dir.register("alice", "secret");
        dir.register("alice", "other");

        assert!(!dir.is_valid("alice", "secret"));
        assert!(dir.is_valid("alice", "other"));
    }

    #[test]
    fn test_address_sentinel_then_last_saved() {
        let mut dir = ClientDirectory::new();
        assert_eq!(dir.address_for("bob"), UNKNOWN_ADDRESS);

        dir.save_address("bob", "1 Via Roma");
        dir.save_address("bob", "2 Via Milano");
        assert_eq!(dir.address_for("bob"), "2 Via Milano");
    }
}
