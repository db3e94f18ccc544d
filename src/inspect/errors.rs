//! Inspect errors
//!
//! Only the initiating query or the output sink can fail an inspect call;
//! per-record decode problems are reported as diagnostics instead.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for inspect operations
pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unable to write output: {0}")]
    Output(#[from] std::io::Error),
}
