//! Full-keyspace export to a directory tree
//!
//! One pass, no retries:
//! Scanning → per record {derive path → ensure directories → open file →
//! decode+render or raw bytes → close file} → Done.
//!
//! Only the initial scan can fail the export. Every per-record failure is
//! reported with the record's key and the scan moves on.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::codec::{CodecError, DecodeOutcome, ObjectDecoder};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::{KeyValueRecord, KeyValueStore, SortOrder};

use super::errors::{ExportError, ExportResult};
use super::target::ExportTarget;

/// Every exported key lives under this prefix.
pub const EXPORT_PREFIX: &str = "/";

/// Extension appended to every exported file by default.
pub const DEFAULT_EXTENSION: &str = "yaml";

/// Per-run export counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Records written as a header plus encoded body
    pub decoded: u64,
    /// Records written verbatim because they could not be decoded or encoded
    pub raw: u64,
    /// Records for which no file could be written
    pub failed: u64,
}

impl ExportStats {
    pub fn total(&self) -> u64 {
        self.decoded + self.raw + self.failed
    }
}

/// How a single record ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Written {
    Decoded,
    Raw,
}

/// Writes every record of the keyspace to `<root>/<key>.<extension>`.
#[derive(Debug, Clone)]
pub struct Exporter {
    root: PathBuf,
    extension: String,
    order: SortOrder,
}

impl Exporter {
    /// Export under `root` with the default extension, descending key order.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            order: SortOrder::Descend,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Order in which the store is asked to return records.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn target_for(&self, key: &[u8]) -> ExportResult<ExportTarget> {
        ExportTarget::derive(&self.root, key, &self.extension)
    }

    /// Scan the whole keyspace and write one file per record.
    pub fn export_all<S>(&self, store: &mut S, decoder: &ObjectDecoder) -> ExportResult<ExportStats>
    where
        S: KeyValueStore + ?Sized,
    {
        log_event(Event::DumpBegin);

        let records = store.scan_prefix(EXPORT_PREFIX.as_bytes(), self.order)?;
        let mut stats = ExportStats::default();

        for record in &records {
            match self.export_record(record, decoder) {
                Ok(Written::Decoded) => stats.decoded += 1,
                Ok(Written::Raw) => stats.raw += 1,
                Err(err) => {
                    let key = record.key_str();
                    let reason = err.to_string();
                    log_event_with_fields(
                        Event::ExportTargetFailed,
                        &[("key", &*key), ("reason", reason.as_str())],
                    );
                    stats.failed += 1;
                }
            }
        }

        let decoded = stats.decoded.to_string();
        let raw = stats.raw.to_string();
        let failed = stats.failed.to_string();
        let root = self.root.display().to_string();
        log_event_with_fields(
            Event::DumpComplete,
            &[
                ("decoded", decoded.as_str()),
                ("failed", failed.as_str()),
                ("raw", raw.as_str()),
                ("root", root.as_str()),
            ],
        );

        Ok(stats)
    }

    /// Export one record. The file handle is closed before returning on every path.
    fn export_record(&self, record: &KeyValueRecord, decoder: &ObjectDecoder) -> ExportResult<Written> {
        let target = self.target_for(record.key())?;
        let key = record.key_str();

        fs::create_dir_all(target.directory()).map_err(|source| ExportError::CreateDirectory {
            path: target.directory().to_path_buf(),
            source,
        })?;

        let mut file = File::create(target.file_path()).map_err(|source| ExportError::CreateFile {
            path: target.file_path().to_path_buf(),
            source,
        })?;

        let (contents, written) = match decoder.decode(record.value()) {
            DecodeOutcome::Decoded(object) => match decoder.render_document(&object) {
                Ok(document) => (document, Written::Decoded),
                Err(err) => {
                    report_fallback(Event::EncodeFailed, &key, &target, &err);
                    (record.value().to_vec(), Written::Raw)
                }
            },
            DecodeOutcome::DecodeFailed(err) => {
                report_fallback(Event::DecodeFailed, &key, &target, &err);
                (record.value().to_vec(), Written::Raw)
            }
        };

        file.write_all(&contents)
            .and_then(|()| file.flush())
            .map_err(|source| ExportError::WriteFile {
                path: target.file_path().to_path_buf(),
                source,
            })?;

        if written == Written::Decoded {
            let path = target.file_path().display().to_string();
            log_event_with_fields(
                Event::RecordExported,
                &[("key", &*key), ("path", path.as_str())],
            );
        }

        Ok(written)
    }
}

fn report_fallback(event: Event, key: &str, target: &ExportTarget, err: &CodecError) {
    let path = target.file_path().display().to_string();
    let reason = err.to_string();
    log_event_with_fields(
        event,
        &[
            ("fallback", "raw"),
            ("key", key),
            ("path", path.as_str()),
            ("reason", reason.as_str()),
        ],
    );
}
