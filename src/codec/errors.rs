//! Decode and encode errors
//!
//! None of these are fatal to a scan: callers degrade to raw bytes or skip
//! the record with a diagnostic.

use thiserror::Error;

use super::scheme::GroupVersionKind;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Reasons a value could not be decoded or a decoded object could not be rendered
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("value is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("value is not a JSON object")]
    NotAnObject,

    #[error("object has no string `{field}` field")]
    MissingTypeMeta { field: &'static str },

    #[error("malformed apiVersion `{0}`")]
    MalformedApiVersion(String),

    #[error("no kind registered for {0}")]
    UnrecognizedKind(GroupVersionKind),

    #[error("{0} encoded values are not supported")]
    UnsupportedEncoding(&'static str),

    #[error("unable to encode object: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("unable to write encoded object: {0}")]
    Write(#[source] std::io::Error),

    #[error("invalid kind `{0}`, expected `group/version/Kind` or `version/Kind`")]
    InvalidKindSpec(String),
}
