//! Observable events
//!
//! Events are explicit and typed; their string names are stable so that
//! operators can grep diagnostics.

use std::fmt;

/// Observable events emitted while inspecting or exporting a keyspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration & connection
    /// Configuration resolved from file and flags
    ConfigLoaded,
    /// Store connection established
    StoreConnected,

    // Listing
    /// Key listing finished
    ListComplete,

    // Fetch
    /// Single-key fetch finished
    FetchComplete,

    // Per-record decode
    /// A value could not be decoded into a typed object
    DecodeFailed,
    /// A decoded object could not be rendered as text
    EncodeFailed,

    // Export
    /// Full export started
    DumpBegin,
    /// Decoded record written to its export target
    RecordExported,
    /// Export target could not be derived, created or written
    ExportTargetFailed,
    /// Full export finished
    DumpComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",

            Event::ListComplete => "LIST_COMPLETE",

            Event::FetchComplete => "FETCH_COMPLETE",

            Event::DecodeFailed => "DECODE_FAILED",
            Event::EncodeFailed => "ENCODE_FAILED",

            Event::DumpBegin => "DUMP_BEGIN",
            Event::RecordExported => "RECORD_EXPORTED",
            Event::ExportTargetFailed => "EXPORT_TARGET_FAILED",
            Event::DumpComplete => "DUMP_COMPLETE",
        }
    }

    /// Returns true if the event reports a problem with one record
    pub fn is_per_record_failure(&self) -> bool {
        matches!(
            self,
            Event::DecodeFailed | Event::EncodeFailed | Event::ExportTargetFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
