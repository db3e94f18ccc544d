//! Decoded objects and decode outcomes

use serde_json::{Map, Value};

use super::errors::{CodecError, CodecResult};
use super::scheme::GroupVersionKind;

/// A typed object recovered from a stored value.
///
/// The payload is kept opaque: only the type tag is inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedObject {
    gvk: GroupVersionKind,
    payload: Map<String, Value>,
}

impl DecodedObject {
    pub fn new(gvk: GroupVersionKind, payload: Map<String, Value>) -> Self {
        Self { gvk, payload }
    }

    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    pub fn kind(&self) -> &str {
        &self.gvk.kind
    }

    /// Version component of the object's group/version.
    pub fn version(&self) -> &str {
        &self.gvk.version
    }

    /// Full `apiVersion` value, including the group.
    pub fn api_version(&self) -> String {
        self.gvk.api_version()
    }

    /// Structured payload in its stored field order.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

/// Result of attempting to decode one stored value.
#[derive(Debug)]
pub enum DecodeOutcome {
    Decoded(DecodedObject),
    DecodeFailed(CodecError),
}

impl DecodeOutcome {
    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }

    pub fn into_result(self) -> CodecResult<DecodedObject> {
        match self {
            DecodeOutcome::Decoded(object) => Ok(object),
            DecodeOutcome::DecodeFailed(err) => Err(err),
        }
    }
}

impl From<CodecResult<DecodedObject>> for DecodeOutcome {
    fn from(result: CodecResult<DecodedObject>) -> Self {
        match result {
            Ok(object) => DecodeOutcome::Decoded(object),
            Err(err) => DecodeOutcome::DecodeFailed(err),
        }
    }
}
