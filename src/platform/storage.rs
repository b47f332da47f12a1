//! Persistent key-value storage
//!
//! On wasm this wraps LocalStorage; a missing or blocked LocalStorage
//! (private browsing, storage quota) degrades every operation to a no-op
//! rather than failing the game. On native it is an in-memory map, which
//! doubles as the test harness for everything that persists state.

#[cfg(not(target_arch = "wasm32"))]
use std::cell::RefCell;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;

/// Handle to the platform's persistent string store
pub struct KeyValueStore {
    #[cfg(target_arch = "wasm32")]
    storage: Option<web_sys::Storage>,
    #[cfg(not(target_arch = "wasm32"))]
    map: RefCell<HashMap<String, String>>,
}

impl KeyValueStore {
    /// Open the platform store
    #[cfg(target_arch = "wasm32")]
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, persistence disabled");
        }
        Self { storage }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open() -> Self {
        Self {
            map: RefCell::new(HashMap::new()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn set(&self, key: &str, value: &str) {
        self.map.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    #[cfg(target_arch = "wasm32")]
    pub fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }

    /// Drop every key in the store
    #[cfg(target_arch = "wasm32")]
    pub fn clear(&self) {
        if let Some(storage) = &self.storage {
            let _ = storage.clear();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear(&self) {
        self.map.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let store = KeyValueStore::open();
        assert_eq!(store.get("missing"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "v2");
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = KeyValueStore::open();
        store.set("a", "1");
        store.set("b", "2");
        store.remove("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b").as_deref(), Some("2"));
        store.clear();
        assert_eq!(store.get("b"), None);
    }
}
