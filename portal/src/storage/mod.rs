//! # Credential Storage
//!
//! The persisted client-side session: a bearer token under `token` and the
//! serialized profile under `user`.
//!
//! The store is injected (`Arc<dyn CredentialStore>`) into both the API client
//! and the route guard, so neither reaches for ambient global state.
//!
//! ## Implementations
//!
//! - [`MemoryStore`]: process-local, used by tests and embedders
//! - [`FileStore`]: JSON file on disk, used by the CLI so the session survives
//!   between invocations
//!
//! Reads and writes are atomic per call only. A guard that reads the token and
//! then awaits a verification call may observe a different value afterwards.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Keys of the two persisted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Bearer credential
    Token,
    /// Serialized [`shared::CurrentUser`]
    User,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Token => "token",
            StorageKey::User => "user",
        }
    }

    pub fn all() -> &'static [StorageKey] {
        &[StorageKey::Token, StorageKey::User]
    }
}

/// Key-value capability holding the session credential.
///
/// `clear` removes `token` and `user` together; there is no way to remove one
/// without the other.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<String>;

    fn set(&self, key: StorageKey, value: String);

    fn clear(&self);

    /// Shorthand for `get(StorageKey::Token)`, ignoring empty values.
    fn token(&self) -> Option<String> {
        self.get(StorageKey::Token).filter(|t| !t.is_empty())
    }
}
