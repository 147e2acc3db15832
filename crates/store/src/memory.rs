//! Snapshot-oriented record stores.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use pressdesk_core::{DomainError, DomainResult};

/// Keyed record store returning owned snapshots.
///
/// Reads hand back clones; writes replace whole records. Callers follow a
/// read-snapshot, mutate-copy, write-back discipline, so no live reference
/// into shared state escapes the store. Concurrent-edit conflict resolution
/// is out of scope; the last write wins.
pub trait SnapshotStore<K, V> {
    /// Insert a new record. Fails with [`DomainError::Conflict`] if the
    /// key is already present.
    fn insert(&self, key: K, value: V) -> DomainResult<()>;

    /// Snapshot of one record.
    fn get(&self, key: &K) -> Option<V>;

    /// Snapshots of every record (unspecified order).
    fn list(&self) -> Vec<V>;

    /// Replace an existing record, returning the new snapshot. Fails with
    /// [`DomainError::NotFound`] if the key is absent.
    fn replace(&self, key: &K, value: V) -> DomainResult<V>;

    /// Remove a record, returning its final snapshot.
    fn remove(&self, key: &K) -> Option<V>;
}

/// In-memory store. Intended for tests/dev and as the reference
/// implementation of the snapshot discipline; persistence-backed stores
/// live with the external persistence collaborator.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SnapshotStore<K, V> for InMemoryStore<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn insert(&self, key: K, value: V) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("store lock poisoned"))?;
        if map.contains_key(&key) {
            return Err(DomainError::conflict("record already exists"));
        }
        map.insert(key, value);
        Ok(())
    }

    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn list(&self) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.values().cloned().collect()
    }

    fn replace(&self, key: &K, value: V) -> DomainResult<V> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("store lock poisoned"))?;
        if !map.contains_key(key) {
            return Err(DomainError::not_found());
        }
        map.insert(key.clone(), value.clone());
        Ok(value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_returns_a_snapshot() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.insert(1, "first".to_string()).unwrap();

        let mut snapshot = store.get(&1).unwrap();
        snapshot.push_str(" (edited)");
        // The copy is independent of the stored record.
        assert_eq!(store.get(&1).unwrap(), "first");
    }

    #[test]
    fn duplicate_insert_is_a_conflict() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.insert(1, "first".to_string()).unwrap();
        let err = store.insert(1, "again".to_string()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn replace_requires_an_existing_record() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        let err = store.replace(&7, "ghost".to_string()).unwrap_err();
        assert_eq!(err, DomainError::NotFound);

        store.insert(7, "real".to_string()).unwrap();
        let snapshot = store.replace(&7, "updated".to_string()).unwrap();
        assert_eq!(snapshot, "updated");
    }

    #[test]
    fn remove_returns_the_final_snapshot() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.insert(3, "bye".to_string()).unwrap();
        assert_eq!(store.remove(&3), Some("bye".to_string()));
        assert_eq!(store.get(&3), None);
        assert_eq!(store.remove(&3), None);
    }
}
