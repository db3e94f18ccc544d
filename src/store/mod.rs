//! Store access subsystem
//!
//! The rest of the crate talks to the key-value store only through the
//! [`KeyValueStore`] trait, which exposes the three read-only query shapes
//! the tool needs:
//!
//! - keys-only scan, either from a start key or within a prefix
//! - exact-key lookup returning zero or more records
//! - prefix scan returning full records
//!
//! Results are returned in the order the store produced them. Nothing here
//! writes to the store.

mod errors;
mod etcd;
mod memory;
mod record;

pub use errors::{StoreError, StoreResult};
pub use etcd::{ConnectionSettings, EtcdStore};
pub use memory::MemoryStore;
pub use record::{KeyScope, KeyValueRecord, SortOrder};

/// Read-only query primitives over a key-value store.
pub trait KeyValueStore {
    /// Keys-only scan. Values are never transferred.
    fn list_keys(&mut self, scope: KeyScope, order: SortOrder) -> StoreResult<Vec<Vec<u8>>>;

    /// Exact-key lookup. An absent key yields an empty vector, not an error.
    fn get(&mut self, key: &[u8]) -> StoreResult<Vec<KeyValueRecord>>;

    /// Every record whose key starts with `prefix`, sorted by key as requested.
    fn scan_prefix(&mut self, prefix: &[u8], order: SortOrder) -> StoreResult<Vec<KeyValueRecord>>;
}
