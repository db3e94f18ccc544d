//! Best-effort decoding of stored values into typed objects
//!
//! Decoding is read-only: the raw bytes are borrowed, never consumed, so a
//! caller can always fall back to treating them as opaque.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use serde_json::Value;

use super::encoder::{PayloadEncoder, YamlEncoder};
use super::errors::{CodecError, CodecResult};
use super::object::{DecodeOutcome, DecodedObject};
use super::scheme::{GroupVersionKind, Scheme};

/// Prefix of the binary protobuf envelope used by Kubernetes storage.
const PROTOBUF_MAGIC: &[u8] = b"k8s\x00";

/// Decodes stored values against a [`Scheme`] and renders decoded objects as YAML.
#[derive(Clone)]
pub struct ObjectDecoder {
    scheme: Scheme,
    encoder: Arc<dyn PayloadEncoder>,
}

impl fmt::Debug for ObjectDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDecoder")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

impl ObjectDecoder {
    /// Decoder rendering YAML.
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            encoder: Arc::new(YamlEncoder),
        }
    }

    /// Replace the payload encoder used by `encode` and `render_document`.
    pub fn with_encoder(mut self, encoder: impl PayloadEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Attempt to decode `raw`. Never panics and never fails the caller.
    pub fn decode(&self, raw: &[u8]) -> DecodeOutcome {
        self.try_decode(raw).into()
    }

    fn try_decode(&self, raw: &[u8]) -> CodecResult<DecodedObject> {
        if raw.starts_with(PROTOBUF_MAGIC) {
            return Err(CodecError::UnsupportedEncoding("protobuf"));
        }

        let value: Value = serde_json::from_slice(raw).map_err(CodecError::NotJson)?;
        let Value::Object(payload) = value else {
            return Err(CodecError::NotAnObject);
        };

        let api_version = payload
            .get("apiVersion")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingTypeMeta { field: "apiVersion" })?;
        let kind = payload
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingTypeMeta { field: "kind" })?;

        let gvk = GroupVersionKind::from_api_version(api_version, kind)?;
        if !self.scheme.recognizes(&gvk) {
            return Err(CodecError::UnrecognizedKind(gvk));
        }

        Ok(DecodedObject::new(gvk, payload))
    }

    /// Render the object's payload into `out`, keeping field order.
    pub fn encode<W: Write + ?Sized>(&self, object: &DecodedObject, out: &mut W) -> CodecResult<()> {
        let text = self.encoder.encode_payload(object.payload())?;
        out.write_all(text.as_bytes()).map_err(CodecError::Write)
    }

    /// Header lines followed by the encoded body, fully rendered in memory.
    ///
    /// Nothing is returned unless the whole document rendered, so a failure
    /// never leaves half a document behind in the caller's sink.
    pub fn render_document(&self, object: &DecodedObject) -> CodecResult<Vec<u8>> {
        let mut document = format!(
            "kind: {}\napiVersion: {}\n",
            object.kind(),
            object.version()
        )
        .into_bytes();
        self.encode(object, &mut document)?;
        Ok(document)
    }
}
