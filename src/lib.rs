//! etcdhelper - Inspect and export the contents of an etcd keyspace
//!
//! Read-only: keys are listed, single values decoded and printed, and the
//! whole keyspace can be dumped to a directory tree of YAML files.

pub mod cli;
pub mod codec;
pub mod export;
pub mod inspect;
pub mod observability;
pub mod store;
