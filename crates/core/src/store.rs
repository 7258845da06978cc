//! Keyed record store contract.
//!
//! Each record type lives in its own store instance (its own namespace). The
//! ledger only needs point reads, point writes, removal, and a full scan in a
//! stable order; anything richer belongs to the backing engine.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::entity::Entity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable mapping from string key to one record type.
///
/// Implementations must be linearizable per key. `values` enumerates in an
/// unspecified but stable order.
pub trait KeyedStore<V>: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<V>, StoreError>;
    fn insert(&self, key: String, value: V) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<Option<V>, StoreError>;
    fn values(&self) -> Result<Vec<V>, StoreError>;
}

/// Store handle shared between the components that read or write it.
pub type SharedStore<V> = Arc<dyn KeyedStore<V>>;

impl<V, S> KeyedStore<V> for Arc<S>
where
    S: KeyedStore<V> + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        (**self).get(key)
    }

    fn insert(&self, key: String, value: V) -> Result<(), StoreError> {
        (**self).insert(key, value)
    }

    fn remove(&self, key: &str) -> Result<Option<V>, StoreError> {
        (**self).remove(key)
    }

    fn values(&self) -> Result<Vec<V>, StoreError> {
        (**self).values()
    }
}

/// Convenience for stores whose values carry their own key.
pub trait EntityStore<V: Entity>: KeyedStore<V> {
    fn put(&self, value: V) -> Result<(), StoreError> {
        let key = value.store_key();
        self.insert(key, value)
    }
}

impl<V: Entity, S: KeyedStore<V> + ?Sized> EntityStore<V> for S {}

/// In-memory store for tests/dev.
///
/// Backed by a `BTreeMap`, so `values` comes back in key order. With UUIDv7
/// keys that is creation order.
#[derive(Debug)]
pub struct InMemoryStore<V> {
    inner: RwLock<BTreeMap<String, V>>,
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Wrap a fresh store as a [`SharedStore`].
    pub fn shared() -> SharedStore<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        Arc::new(Self::new())
    }
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedStore<V> for InMemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn insert(&self, key: String, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(key))
    }

    fn values(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_insert_remove_roundtrip() {
        let store: InMemoryStore<u32> = InMemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.insert("a".to_string(), 1).unwrap();
        store.insert("a".to_string(), 2).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(2));
        assert_eq!(store.values().unwrap(), vec![2]);

        assert_eq!(store.remove("a").unwrap(), Some(2));
        assert_eq!(store.remove("a").unwrap(), None);
        assert!(store.values().unwrap().is_empty());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = Arc::new(InMemoryStore::<u8>::new());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store lock");
        })
        .join();

        let store: &InMemoryStore<u8> = &store;
        assert_eq!(store.get("k").unwrap_err(), StoreError::Poisoned);
        assert_eq!(store.values().unwrap_err(), StoreError::Poisoned);
        assert_eq!(store.insert("k".to_string(), 1).unwrap_err(), StoreError::Poisoned);
    }

    #[test]
    fn values_enumerate_in_key_order() {
        let store: InMemoryStore<&'static str> = InMemoryStore::new();
        store.insert("b".to_string(), "second").unwrap();
        store.insert("c".to_string(), "third").unwrap();
        store.insert("a".to_string(), "first").unwrap();

        assert_eq!(store.values().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn shared_handle_sees_same_data() {
        let shared: SharedStore<u8> = InMemoryStore::shared();
        let other = shared.clone();
        shared.insert("k".to_string(), 7).unwrap();
        assert_eq!(other.get("k").unwrap(), Some(7));
    }
}
