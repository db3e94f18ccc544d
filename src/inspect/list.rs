//! Key enumeration

use crate::store::{KeyScope, KeyValueStore, SortOrder, StoreResult};

/// Enumerate key names.
///
/// An empty `prefix` covers the whole keyspace starting from the lowest key;
/// otherwise only keys starting with `prefix` are returned. Keys arrive in
/// the store's natural order and values are never fetched. Any query failure
/// aborts the whole call before a single key is yielded.
pub fn list_keys<S>(store: &mut S, prefix: &str) -> StoreResult<impl Iterator<Item = String>>
where
    S: KeyValueStore + ?Sized,
{
    let scope = if prefix.is_empty() {
        KeyScope::whole_keyspace()
    } else {
        KeyScope::Prefix(prefix.as_bytes().to_vec())
    };

    let keys = store.list_keys(scope, SortOrder::None)?;
    Ok(keys
        .into_iter()
        .map(|key| String::from_utf8_lossy(&key).into_owned()))
}
