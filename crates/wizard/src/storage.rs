//! Session-scoped key/value persistence.

use std::collections::BTreeMap;

pub const KEY_SESSION_ID: &str = "session.id";
pub const KEY_DISPLAY_NAME: &str = "session.display_name";
pub const KEY_STEP: &str = "wizard.step";
pub const KEY_LOCATION: &str = "wizard.location";
pub const KEY_EVIDENCE: &str = "wizard.evidence";
pub const KEY_DOCUMENT_READY: &str = "wizard.document_ready";
pub const KEY_LOCATION_LOCKED: &str = "wizard.location_locked";

/// Keys owned by the wizard; cleared on reset.
pub const WIZARD_KEYS: &[&str] = &[
    KEY_STEP,
    KEY_LOCATION,
    KEY_EVIDENCE,
    KEY_DOCUMENT_READY,
    KEY_LOCATION_LOCKED,
];

/// Keys owned by the login session; cleared on logout.
pub const SESSION_KEYS: &[&str] = &[KEY_SESSION_ID, KEY_DISPLAY_NAME];

/// String key/value storage that survives a reload.
///
/// Writes are best effort: a store that cannot persist logs and carries on,
/// the wizard keeps working from memory.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);

    fn remove_all(&mut self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }
}

/// In-memory store, used by tests and as the fallback when no durable
/// storage is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
