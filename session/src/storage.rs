//! Durable key/value storage seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client backs this with `localStorage`, the CLI with a JSON
//! file, tests with `MemoryStore`. Session keys are written only by
//! `SessionStore`; preference keys only by `Preferences`.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Fixed key names shared with the rest of the web app.
pub mod keys {
    pub const AUTHENTICATED: &str = "isAuthenticated";
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const ADMIN: &str = "isAdmin";
    pub const THEME: &str = "theme";
    pub const SIDEBAR_COLLAPSED: &str = "sidebarCollapsed";

    /// Keys removed by a session clear. Preference keys are never listed here.
    pub const SESSION: [&str; 4] = [AUTHENTICATED, TOKEN, USER, ADMIN];
}

/// Best-effort string storage that survives reloads.
///
/// Writes are fire-and-forget like the browser API: a backend that cannot
/// persist logs and carries on.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local storage for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with initial entries.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
        Self { entries: Mutex::new(entries) }
    }

    /// Copy of all entries, sorted by key.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}
