//! Single-key fetch and decode

use std::io::Write;

use crate::codec::{CodecError, DecodeOutcome, ObjectDecoder};
use crate::observability::{log_event_with_fields, Event};
use crate::store::KeyValueStore;

use super::errors::InspectResult;

/// Counts of what a fetch produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Records decoded and written to the output
    pub printed: u64,
    /// Records skipped because they could not be decoded or encoded
    pub skipped: u64,
}

/// Fetch every record stored under `key`, decode each one and write it to `out`.
///
/// Each decoded record is written as a `kind:` line, an `apiVersion:` line and
/// the YAML body. Records that fail to decode or encode are reported with a
/// warning and skipped. Zero matches is a successful, empty fetch.
pub fn fetch<S, W>(
    store: &mut S,
    decoder: &ObjectDecoder,
    key: &str,
    out: &mut W,
) -> InspectResult<FetchStats>
where
    S: KeyValueStore + ?Sized,
    W: Write + ?Sized,
{
    let records = store.get(key.as_bytes())?;
    let mut stats = FetchStats::default();

    for record in &records {
        let key = record.key_str();

        let object = match decoder.decode(record.value()) {
            DecodeOutcome::Decoded(object) => object,
            DecodeOutcome::DecodeFailed(err) => {
                report(Event::DecodeFailed, &key, &err);
                stats.skipped += 1;
                continue;
            }
        };

        let document = match decoder.render_document(&object) {
            Ok(document) => document,
            Err(err) => {
                report(Event::EncodeFailed, &key, &err);
                stats.skipped += 1;
                continue;
            }
        };

        out.write_all(&document)?;
        stats.printed += 1;
    }

    out.flush()?;

    let printed = stats.printed.to_string();
    let skipped = stats.skipped.to_string();
    log_event_with_fields(
        Event::FetchComplete,
        &[("key", key), ("printed", printed.as_str()), ("skipped", skipped.as_str())],
    );

    Ok(stats)
}

fn report(event: Event, key: &str, err: &CodecError) {
    let reason = err.to_string();
    log_event_with_fields(event, &[("key", key), ("reason", reason.as_str())]);
}
