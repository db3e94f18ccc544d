//! Store access errors
//!
//! Every variant here is fatal to the command that issued the query:
//! per-record problems never surface as a `StoreError`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while connecting to or querying the key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to read TLS material {}: {source}", path.display())]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to create client config: {0}")]
    Credentials(String),

    #[error("unable to connect to {endpoints}: {source}")]
    Connect {
        endpoints: String,
        #[source]
        source: etcd_client::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] etcd_client::Error),

    #[error("unable to start client runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_file_error_names_the_path() {
        let err = StoreError::CredentialFile {
            path: PathBuf::from("/etc/etcd/client.key"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let display = err.to_string();
        assert!(display.contains("/etc/etcd/client.key"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn test_credentials_error_display() {
        let err = StoreError::Credentials("client certificate requires a client key".into());
        assert!(err.to_string().starts_with("unable to create client config"));
    }
}
