//! Session persistence: storage trait, backends, and the typed session view.
//!
//! The store is plain string key-value storage, the desktop-app equivalent of
//! browser `localStorage`. Every implementation swallows storage-layer
//! failures and returns a sentinel (`None` / `false`) instead of propagating;
//! losing a cached session is recoverable, crashing the UI over it is not.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde_json::Value;

pub(crate) const USER_KEY: &str = "mardify_user";
pub(crate) const TOKEN_KEY: &str = "mardify_token";
pub(crate) const APP_STATE_KEY: &str = "mardify_app_state";

/// Host-provided persistent key-value storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    /// Returns whether the remove operation succeeded, not whether the key existed.
    fn remove(&self, key: &str) -> bool;
    fn clear(&self) -> bool;
}

/// In-memory store. Default backend; sessions last for the process lifetime.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.remove(key);
                true
            }
            Err(_) => false,
        }
    }

    fn clear(&self) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.clear();
                true
            }
            Err(_) => false,
        }
    }
}

/// File-backed store: one JSON object on disk, written through on every
/// mutation. Unreadable or malformed files read as an empty store.
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok())
            .unwrap_or_default();

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> bool {
        let Ok(raw) = serde_json::to_string(entries) else {
            return false;
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        fs::write(&self.path, raw).is_ok()
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                self.persist(&entries)
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.remove(key);
                self.persist(&entries)
            }
            Err(_) => false,
        }
    }

    fn clear(&self) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.clear();
                self.persist(&entries)
            }
            Err(_) => false,
        }
    }
}

/// Typed view over a session store: the persisted pair of authenticated user
/// object and bearer token, plus opaque app-state passthrough.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Current bearer token, if present and non-empty.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn save_token(&self, token: &str) -> bool {
        self.store.set(TOKEN_KEY, token)
    }

    /// Stored user object. Unparseable stored JSON reads as `None`.
    pub fn user(&self) -> Option<Value> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_user(&self, user: &Value) -> bool {
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(USER_KEY, &raw),
            Err(_) => false,
        }
    }

    pub fn app_state(&self) -> Option<String> {
        self.store.get(APP_STATE_KEY)
    }

    pub fn save_app_state(&self, state: &str) -> bool {
        self.store.set(APP_STATE_KEY, state)
    }

    /// A session is valid iff both the user object and the token are present
    /// and non-empty.
    pub fn is_valid(&self) -> bool {
        self.user().map(|user| !user.is_null()).unwrap_or(false) && self.token().is_some()
    }

    /// Remove user and token. App state is left alone.
    pub fn clear(&self) {
        self.store.remove(USER_KEY);
        self.store.remove(TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handle() -> SessionHandle {
        SessionHandle::new(Arc::new(MemorySessionStore::new()))
    }

    #[test]
    fn token_roundtrip_filters_empty() {
        let session = handle();
        assert_eq!(session.token(), None);

        assert!(session.save_token("tok-1"));
        assert_eq!(session.token().as_deref(), Some("tok-1"));

        assert!(session.save_token(""));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn user_roundtrip() {
        let session = handle();
        let user = json!({"id": 7, "display_name": "Ana"});
        assert!(session.save_user(&user));
        assert_eq!(session.user(), Some(user));
    }

    #[test]
    fn unparseable_user_reads_as_none() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(USER_KEY, "not json");
        let session = SessionHandle::new(store);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn validity_requires_both_parts() {
        let session = handle();
        assert!(!session.is_valid());

        session.save_user(&json!({"id": 1}));
        assert!(!session.is_valid());

        session.save_token("tok");
        assert!(session.is_valid());

        session.clear();
        assert!(!session.is_valid());
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn clear_leaves_app_state() {
        let session = handle();
        session.save_app_state("{\"tab\":\"chat\"}");
        session.save_token("tok");
        session.clear();
        assert_eq!(session.app_state().as_deref(), Some("{\"tab\":\"chat\"}"));
    }
}
