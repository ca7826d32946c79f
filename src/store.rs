//! Persistent key-value storage
//!
//! The cart and the order history are each stored as a single JSON string
//! under their own key.
use super::error::StoreError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Durable store backed by a sled database. Every write is flushed so a
/// restarted process sees it.
#[derive(Clone)]
pub struct SledStore {
    instance: Arc<sled::Db>,
}

impl SledStore {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(sled::open(path)?)))
    }
    /// A throwaway database, removed when the last handle drops.
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self::new(Arc::new(db)))
    }
}

impl KeyValueStore for SledStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(raw) = self.instance.get(key.as_bytes())? else {
            return Ok(None);
        };
        String::from_utf8(raw.to_vec())
            .map(Some)
            .map_err(|source| StoreError::Encoding {
                key: key.to_string(),
                source,
            })
    }
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.instance.insert(key.as_bytes(), value.as_bytes())?;
        self.instance.flush()?;
        Ok(())
    }
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.instance.remove(key.as_bytes())?;
        self.instance.flush()?;
        Ok(())
    }
}

/// Process-local store. Clones share the same map, which lets a test drop one
/// service and "restart" another over the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    /// While set, `save` and `remove` fail without touching the map.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes are disabled".into()));
        }
        Ok(())
    }
    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_save_load_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "[]").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("[]"));

        store.remove("k").unwrap();
        assert!(!store.contains_key("k"));
    }

    #[test]
    fn memory_store_failed_write_leaves_data() {
        let store = MemoryStore::new();
        store.save("k", "old").unwrap();
        store.set_fail_writes(true);

        assert!(store.save("k", "new").is_err());
        assert!(store.remove("k").is_err());
        assert_eq!(store.load("k").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save("k", "v").unwrap();

        assert_eq!(other.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn sled_store_roundtrip() {
        let store = SledStore::temporary().unwrap();
        store.save("@cart_items", "[1,2]").unwrap();

        assert_eq!(store.load("@cart_items").unwrap().as_deref(), Some("[1,2]"));
        store.remove("@cart_items").unwrap();
        assert_eq!(store.load("@cart_items").unwrap(), None);
    }

    #[test]
    fn sled_store_rejects_non_utf8() {
        let db = Arc::new(sled::Config::new().temporary(true).open().unwrap());
        db.insert("bad", vec![0xff, 0xfe]).unwrap();

        let store = SledStore::new(db);
        assert!(matches!(
            store.load("bad"),
            Err(StoreError::Encoding { .. })
        ));
    }
}
