use std::collections::HashMap;

use parking_lot::RwLock;

use super::{CredentialStore, StorageKey};

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(StorageKey::Token, token.into());
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.entries.read().get(&key).cloned()
    }

    fn set(&self, key: StorageKey, value: String) {
        self.entries.write().insert(key, value);
    }

    fn clear(&self) {
        let mut entries = self.entries.write();
        for key in StorageKey::all() {
            entries.remove(key);
        }
    }
}
