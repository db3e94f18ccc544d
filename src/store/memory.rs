//! Ordered in-memory store
//!
//! Implements the same range semantics as the etcd adapter so the inspect and
//! export paths can run without a cluster.

use std::collections::BTreeMap;

use super::errors::StoreResult;
use super::record::{KeyScope, KeyValueRecord, SortOrder};
use super::KeyValueStore;

/// In-memory `KeyValueStore` backed by a `BTreeMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn ordered<T>(mut items: Vec<T>, order: SortOrder) -> Vec<T> {
        if order == SortOrder::Descend {
            items.reverse();
        }
        items
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn list_keys(&mut self, scope: KeyScope, order: SortOrder) -> StoreResult<Vec<Vec<u8>>> {
        let keys = self
            .data
            .keys()
            .filter(|key| scope.contains(key))
            .cloned()
            .collect();
        Ok(Self::ordered(keys, order))
    }

    fn get(&mut self, key: &[u8]) -> StoreResult<Vec<KeyValueRecord>> {
        Ok(self
            .data
            .get(key)
            .map(|value| KeyValueRecord::new(key, value.clone()))
            .into_iter()
            .collect())
    }

    fn scan_prefix(&mut self, prefix: &[u8], order: SortOrder) -> StoreResult<Vec<KeyValueRecord>> {
        let records = self
            .data
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| KeyValueRecord::new(key.clone(), value.clone()))
            .collect();
        Ok(Self::ordered(records, order))
    }
}
