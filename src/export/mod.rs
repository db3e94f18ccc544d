//! Export subsystem
//!
//! Writes a snapshot of the whole keyspace to local files, one per key,
//! mirroring the key hierarchy as directories.
//!
//! Decodable values become a `kind:`/`apiVersion:` header followed by the
//! YAML body. Anything else is written byte-for-byte with no header. A
//! record's document is rendered completely in memory before any byte of
//! it reaches the file.

mod errors;
mod exporter;
mod target;

pub use errors::{ExportError, ExportResult};
pub use exporter::{ExportStats, Exporter, DEFAULT_EXTENSION, EXPORT_PREFIX};
pub use target::ExportTarget;
