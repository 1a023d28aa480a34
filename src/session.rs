//! Token persistence for authenticated sessions
//!
//! The backend issues one opaque bearer token per login. The client keeps
//! it in a [`TokenStore`]: an injectable slot holding at most one token,
//! where absence means "guest". Stores have no expiry logic; a token is
//! trusted until the backend rejects it.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Persisted slot for the session token.
///
/// Every request reads the token fresh through this trait at dispatch
/// time, so a logout or re-login between two calls can never pin a stale
/// token into a later request.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any
    fn get(&self) -> Option<String>;

    /// Persist a token, replacing any existing value
    fn set(&self, token: &str);

    /// Remove the persisted token. Safe to call when no token is stored.
    fn clear(&self);
}

/// In-memory token store, the default for tests and short-lived processes
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    fn set(&self, token: &str) {
        let mut guard = self.token.write().unwrap();
        *guard = Some(token.to_string());
    }

    fn clear(&self) {
        let mut guard = self.token.write().unwrap();
        *guard = None;
    }
}

/// File-backed token store surviving process restarts.
///
/// Storage failures follow the same semantics as browser local storage:
/// an unreadable slot reads as empty, and write failures are logged and
/// swallowed rather than failing the login that triggered them.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store persisting the token at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("failed to create token store directory: {}", e);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            log::warn!("failed to persist session token: {}", e);
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("failed to clear session token: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("tok-1");
        assert_eq!(store.get(), Some("tok-1".to_string()));

        store.set("tok-2");
        assert_eq!(store.get(), Some("tok-2".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn memory_store_clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.clear();
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base44_token");

        let store = FileTokenStore::new(&path);
        assert_eq!(store.get(), None);
        store.set("abc123");
        drop(store);

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(), Some("abc123".to_string()));

        reopened.clear();
        assert_eq!(reopened.get(), None);
        assert!(!path.exists());
    }

    #[test]
    fn file_store_swallows_write_and_clear_failures() {
        let dir = tempfile::tempdir().unwrap();
        // A directory occupying the slot path makes both write and
        // remove fail regardless of process privileges.
        let path = dir.path().join("slot");
        fs::create_dir(&path).unwrap();

        let store = FileTokenStore::new(&path);
        store.set("abc123");
        assert_eq!(store.get(), None);

        store.clear();
        assert_eq!(store.get(), None);
        assert!(path.is_dir());
    }

    #[test]
    fn file_store_clear_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("missing"));
        store.clear();
        assert_eq!(store.get(), None);
    }
}
