//! Failure Tier Tests
//!
//! Tests for how failures are split between the whole invocation and a
//! single record:
//! - A failing initiating query aborts list, get and dump
//! - The command layer reports it as a query failure
//! - A bad record among several under one key is skipped, the rest printed
//! - An encode failure degrades the record, never the run

use etcdhelper::cli::{run_command, Command, Config, Outcome};
use etcdhelper::codec::{
    CodecError, CodecResult, ObjectDecoder, PayloadEncoder, Scheme,
};
use etcdhelper::export::{ExportError, ExportStats, Exporter};
use etcdhelper::inspect::{fetch, list_keys, FetchStats, InspectError};
use etcdhelper::store::{KeyScope, KeyValueRecord, KeyValueStore, SortOrder, StoreError, StoreResult};
use serde_json::{Map, Value};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

const CONFIG_MAP: &str = r#"{"kind":"ConfigMap","apiVersion":"v1","metadata":{"name":"first"}}"#;
const SECRET: &str = r#"{"kind":"Secret","apiVersion":"v1","metadata":{"name":"second"}}"#;

/// Store whose every query fails.
struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Query(etcd_client::Error::InvalidArgs("cluster unavailable".into()))
}

impl KeyValueStore for UnavailableStore {
    fn list_keys(&mut self, _scope: KeyScope, _order: SortOrder) -> StoreResult<Vec<Vec<u8>>> {
        Err(unavailable())
    }

    fn get(&mut self, _key: &[u8]) -> StoreResult<Vec<KeyValueRecord>> {
        Err(unavailable())
    }

    fn scan_prefix(&mut self, _prefix: &[u8], _order: SortOrder) -> StoreResult<Vec<KeyValueRecord>> {
        Err(unavailable())
    }
}

/// Store returning the same fixed records for every lookup and scan.
struct FixedRecordsStore {
    records: Vec<KeyValueRecord>,
}

impl FixedRecordsStore {
    fn mixed() -> Self {
        Self {
            records: vec![
                KeyValueRecord::new(b"/ns/first".to_vec(), CONFIG_MAP.as_bytes().to_vec()),
                KeyValueRecord::new(b"/ns/second".to_vec(), b"\x00garbage".to_vec()),
                KeyValueRecord::new(b"/ns/third".to_vec(), SECRET.as_bytes().to_vec()),
            ],
        }
    }
}

impl KeyValueStore for FixedRecordsStore {
    fn list_keys(&mut self, _scope: KeyScope, _order: SortOrder) -> StoreResult<Vec<Vec<u8>>> {
        Ok(self.records.iter().map(|r| r.key().to_vec()).collect())
    }

    fn get(&mut self, _key: &[u8]) -> StoreResult<Vec<KeyValueRecord>> {
        Ok(self.records.clone())
    }

    fn scan_prefix(&mut self, _prefix: &[u8], _order: SortOrder) -> StoreResult<Vec<KeyValueRecord>> {
        Ok(self.records.clone())
    }
}

/// Encoder that fails for every payload.
struct RefusingEncoder;

impl PayloadEncoder for RefusingEncoder {
    fn encode_payload(&self, _payload: &Map<String, Value>) -> CodecResult<String> {
        Err(CodecError::Encode(serde::ser::Error::custom("unsupported value")))
    }
}

fn decoder() -> ObjectDecoder {
    ObjectDecoder::new(Scheme::builtin())
}

// =============================================================================
// Fatal tier: the initiating query fails
// =============================================================================

#[test]
fn test_list_query_failure_is_returned() {
    let err = list_keys(&mut UnavailableStore, "/ns").err();
    assert!(matches!(err, Some(StoreError::Query(_))));
}

#[test]
fn test_fetch_query_failure_is_returned() {
    let mut out = Vec::new();
    let err = fetch(&mut UnavailableStore, &decoder(), "/ns/first", &mut out).unwrap_err();

    assert!(matches!(err, InspectError::Store(StoreError::Query(_))));
    assert!(out.is_empty());
}

#[test]
fn test_export_scan_failure_is_returned_before_any_write() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("out");

    let err = Exporter::new(&root)
        .export_all(&mut UnavailableStore, &decoder())
        .unwrap_err();

    assert!(matches!(err, ExportError::Scan(_)));
    assert!(err.is_fatal());
    assert!(!root.exists());
}

#[test]
fn test_every_action_reports_query_failed() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        output_dir: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    let commands = [
        Command::List {
            prefix: Some("/ns".into()),
        },
        Command::Get {
            key: "/ns/first".into(),
        },
        Command::Dump {
            output_dir: None,
            extension: None,
            order: None,
        },
    ];

    for command in &commands {
        let mut out = Vec::new();
        let err = run_command(command, &config, &mut UnavailableStore, &decoder(), &mut out)
            .unwrap_err();

        assert_eq!(err.code_str(), "ETCDHELPER_CLI_QUERY_FAILED", "{:?}", command);
        assert!(err.message().contains("cluster unavailable"), "{}", err);
        assert!(out.is_empty());
    }
}

#[test]
fn test_list_failure_names_the_prefix() {
    let mut out = Vec::new();
    let err = run_command(
        &Command::List {
            prefix: Some("/registry".into()),
        },
        &Config::default(),
        &mut UnavailableStore,
        &decoder(),
        &mut out,
    )
    .unwrap_err();

    assert!(err.message().starts_with("list /registry: "));
}

// =============================================================================
// Per-record tier: one bad record among several
// =============================================================================

#[test]
fn test_fetch_skips_bad_record_and_prints_the_rest() {
    let mut out = Vec::new();
    let stats = fetch(&mut FixedRecordsStore::mixed(), &decoder(), "/ns", &mut out).unwrap();

    assert_eq!(
        stats,
        FetchStats {
            printed: 2,
            skipped: 1
        }
    );

    let text = String::from_utf8(out).unwrap();
    let first = text.find("kind: ConfigMap\napiVersion: v1\n").unwrap();
    let third = text.find("kind: Secret\napiVersion: v1\n").unwrap();
    assert!(first < third);
    assert!(!text.contains("garbage"));
}

#[test]
fn test_get_action_succeeds_despite_bad_record() {
    let mut out = Vec::new();
    let outcome = run_command(
        &Command::Get {
            key: "/ns".into(),
        },
        &Config::default(),
        &mut FixedRecordsStore::mixed(),
        &decoder(),
        &mut out,
    )
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::Fetched(FetchStats {
            printed: 2,
            skipped: 1
        })
    );
}

// =============================================================================
// Encode failure fallback
// =============================================================================

#[test]
fn test_fetch_skips_records_that_fail_to_encode() {
    let decoder = decoder().with_encoder(RefusingEncoder);
    let mut out = Vec::new();

    let stats = fetch(&mut FixedRecordsStore::mixed(), &decoder, "/ns", &mut out).unwrap();

    assert_eq!(
        stats,
        FetchStats {
            printed: 0,
            skipped: 3
        }
    );
    assert!(out.is_empty());
}

#[test]
fn test_export_writes_raw_bytes_when_encoding_fails() {
    let temp_dir = TempDir::new().unwrap();
    let decoder = decoder().with_encoder(RefusingEncoder);

    let stats = Exporter::new(temp_dir.path())
        .export_all(&mut FixedRecordsStore::mixed(), &decoder)
        .unwrap();

    assert_eq!(
        stats,
        ExportStats {
            decoded: 0,
            raw: 3,
            failed: 0
        }
    );
    // No header and no partial body: the stored JSON verbatim.
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("ns/first.yaml")).unwrap(),
        CONFIG_MAP
    );
}
