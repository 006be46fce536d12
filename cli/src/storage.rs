//! JSON-file key/value storage: the terminal stand-in for `localStorage`.
//!
//! The whole map is rewritten on every change. A missing or unreadable file
//! reads as empty, so a corrupt file behaves like a fresh install.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use session::KeyValueStore;

/// Default location: `<config dir>/exam-prep/session.json`.
pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("exam-prep").join("session.json")
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load(&path);
        Self { path, entries: Mutex::new(entries) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) {
        let result = serde_json::to_vec_pretty(entries).map_err(std::io::Error::other).and_then(|raw| {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, raw)
        });
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session file");
        }
    }

    fn mutate(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut entries);
        self.write(&entries);
    }
}

fn load(path: &Path) -> BTreeMap<String, String> {
    let Ok(raw) = std::fs::read(path) else {
        return BTreeMap::new();
    };
    serde_json::from_slice(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
        BTreeMap::new()
    })
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.mutate(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove(&self, key: &str) {
        self.mutate(|entries| {
            entries.remove(key);
        });
    }
}
