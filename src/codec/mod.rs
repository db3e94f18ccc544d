//! Object codec subsystem
//!
//! Turns raw stored values into kind-tagged objects and renders them as
//! human-readable YAML.
//!
//! # Design Principles
//!
//! - Decode failure is an outcome, not an error path: `decode` always returns
//!   a [`DecodeOutcome`]
//! - The catalogue of decodable kinds is an explicit [`Scheme`] value
//! - Field order of the stored object is preserved on output
//! - Payload rendering sits behind [`PayloadEncoder`]; YAML by default

mod decoder;
mod encoder;
mod errors;
mod object;
mod scheme;

pub use decoder::ObjectDecoder;
pub use encoder::{PayloadEncoder, YamlEncoder};
pub use errors::{CodecError, CodecResult};
pub use object::{DecodeOutcome, DecodedObject};
pub use scheme::{GroupVersionKind, Scheme};
