//! Text rendering of decoded payloads

use serde_json::{Map, Value};

use super::errors::{CodecError, CodecResult};

/// Renders an object's payload as text.
pub trait PayloadEncoder: Send + Sync {
    fn encode_payload(&self, payload: &Map<String, Value>) -> CodecResult<String>;
}

/// YAML in the payload's stored field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl PayloadEncoder for YamlEncoder {
    fn encode_payload(&self, payload: &Map<String, Value>) -> CodecResult<String> {
        serde_yaml::to_string(payload).map_err(CodecError::Encode)
    }
}
