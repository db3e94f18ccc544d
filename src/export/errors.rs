//! Export errors
//!
//! `Scan` is the only variant that aborts an export. Every other variant is
//! scoped to a single record and reported as a diagnostic.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unable to scan keyspace: {0}")]
    Scan(#[from] StoreError),

    #[error("key `{key}` cannot be mapped to a file: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("error creating directory {} for writing: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error opening file {} for writing: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing file {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Returns true if the error aborts the whole export rather than one record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExportError::Scan(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_scan_errors_are_fatal() {
        let per_record = ExportError::CreateFile {
            path: PathBuf::from("ns/config.yaml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!per_record.is_fatal());

        let invalid = ExportError::InvalidKey {
            key: "/../etc".into(),
            reason: "path escapes the export root",
        };
        assert!(!invalid.is_fatal());

        let scan = ExportError::Scan(StoreError::Credentials("x".into()));
        assert!(scan.is_fatal());
    }

    #[test]
    fn test_display_names_the_file() {
        let err = ExportError::WriteFile {
            path: PathBuf::from("ns/config.yaml"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let display = err.to_string();
        assert!(display.contains("ns/config.yaml"));
        assert!(display.contains("disk full"));
    }
}
