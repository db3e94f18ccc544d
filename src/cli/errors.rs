//! CLI-specific error types
//!
//! Every CliError ends the process with a non-zero status. Per-record
//! problems never surface here; they are logged and the command continues.

use std::fmt;
use std::io;

use crate::export::ExportError;
use crate::inspect::InspectError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file, flag or credential error
    ConfigError,
    /// Could not establish a connection to the store
    ConnectFailed,
    /// A store query failed
    QueryFailed,
    /// I/O error (stdout or output tree)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ETCDHELPER_CLI_CONFIG_ERROR",
            Self::ConnectFailed => "ETCDHELPER_CLI_CONNECT_FAILED",
            Self::QueryFailed => "ETCDHELPER_CLI_QUERY_FAILED",
            Self::IoError => "ETCDHELPER_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Connect failed
    pub fn connect_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConnectFailed, msg)
    }

    /// Query failed
    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::QueryFailed, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Map a store failure raised while connecting.
    ///
    /// Unreadable or mismatched credentials are configuration problems; the
    /// rest means the cluster could not be reached.
    pub fn from_connect(err: StoreError) -> Self {
        match err {
            StoreError::CredentialFile { .. } | StoreError::Credentials(_) => {
                Self::config_error(err.to_string())
            }
            other => Self::connect_failed(other.to_string()),
        }
    }

    /// Map a store failure raised by `action` (e.g. `list /a`).
    pub fn from_query(action: &str, err: StoreError) -> Self {
        Self::query_failed(format!("{}: {}", action, err))
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<InspectError> for CliError {
    fn from(e: InspectError) -> Self {
        match e {
            InspectError::Store(err) => Self::from_query("get", err),
            InspectError::Output(err) => Self::from(err),
        }
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Scan(err) => Self::from_query("dump", err),
            other => Self::io_error(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
