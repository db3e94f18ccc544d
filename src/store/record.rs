//! Records and query shapes exchanged with the store

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single key/value pair as returned by the store.
///
/// The key is a `/`-delimited hierarchical path; the value is opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueRecord {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl KeyValueRecord {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Raw key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Raw value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Key rendered for display and path derivation.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn key_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }
}

/// Which keys a keys-only scan covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyScope {
    /// Every key greater than or equal to the given key.
    FromKey(Vec<u8>),
    /// Every key that starts with the given bytes. An empty prefix is the whole keyspace.
    Prefix(Vec<u8>),
}

impl KeyScope {
    /// The lowest possible key: scanning from it covers the entire keyspace.
    pub fn whole_keyspace() -> Self {
        KeyScope::FromKey(vec![0])
    }

    /// Returns true if `key` falls inside this scope.
    pub fn contains(&self, key: &[u8]) -> bool {
        match self {
            KeyScope::FromKey(start) => key >= start.as_slice(),
            KeyScope::Prefix(prefix) => key.starts_with(prefix),
        }
    }
}

/// Ordering requested from the store. The client never re-sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Whatever the store returns, which is ascending by key.
    #[default]
    None,
    Ascend,
    Descend,
}

impl SortOrder {
    /// Parse the command-line spelling (`asc`, `desc`, `none`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(SortOrder::None),
            "asc" | "ascend" => Some(SortOrder::Ascend),
            "desc" | "descend" => Some(SortOrder::Descend),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOrder::None => "none",
            SortOrder::Ascend => "ascend",
            SortOrder::Descend => "descend",
        };
        f.write_str(s)
    }
}
