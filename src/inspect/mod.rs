//! Inspect subsystem
//!
//! Read-only views of the keyspace printed for an operator:
//! - `list_keys`: key names under a prefix, or the whole keyspace
//! - `fetch`: decoded records stored under one exact key

mod errors;
mod fetch;
mod list;

pub use errors::{InspectError, InspectResult};
pub use fetch::{fetch, FetchStats};
pub use list::list_keys;
