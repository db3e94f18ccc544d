//! CLI command implementations
//!
//! `run` resolves configuration, dials the cluster and dispatches one action.
//! Actions only read from the store. A failure to connect or to run the
//! action's query aborts with a CliError; per-record decode and export
//! problems are logged and the action continues.

use std::io::{self, Write};

use crate::codec::ObjectDecoder;
use crate::export::ExportStats;
use crate::inspect::{self, FetchStats};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::store::{EtcdStore, KeyValueStore};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_lines;

/// What an action produced, for callers that want to inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Listed(u64),
    Fetched(FetchStats),
    Dumped(ExportStats),
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    run_cli(Cli::parse_args())
}

/// Run an already parsed command line against the configured cluster.
pub fn run_cli(cli: Cli) -> CliResult<()> {
    if cli.verbose {
        Logger::set_threshold(Severity::Trace);
    }

    let config = Config::resolve(&cli)?;
    let endpoints = config.endpoints.join(",");
    log_event_with_fields(Event::ConfigLoaded, &[("endpoints", endpoints.as_str())]);

    let decoder = ObjectDecoder::new(config.scheme()?);
    let mut store = connect(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&cli.command, &config, &mut store, &decoder, &mut out)?;
    Ok(())
}

/// Dial the cluster described by `config`.
pub fn connect(config: &Config) -> CliResult<EtcdStore> {
    let settings = config.connection_settings();
    let store = EtcdStore::connect(&settings).map_err(CliError::from_connect)?;

    let endpoints = settings.endpoints.join(",");
    let tls = if settings.uses_tls() {
        "true"
    } else {
        "false"
    };
    log_event_with_fields(
        Event::StoreConnected,
        &[("endpoints", endpoints.as_str()), ("tls", tls)],
    );

    Ok(store)
}

/// Dispatch one action against an open store.
///
/// `list` and `get` write to `out`; `dump` writes under the configured
/// output directory and leaves `out` untouched.
pub fn run_command<S, W>(
    command: &Command,
    config: &Config,
    store: &mut S,
    decoder: &ObjectDecoder,
    out: &mut W,
) -> CliResult<Outcome>
where
    S: KeyValueStore + ?Sized,
    W: Write + ?Sized,
{
    match command {
        Command::List { prefix } => {
            let prefix = prefix.as_deref().unwrap_or("");
            list(store, prefix, out).map(Outcome::Listed)
        }
        Command::Get { key } => {
            let stats = inspect::fetch(store, decoder, key, out)?;
            Ok(Outcome::Fetched(stats))
        }
        Command::Dump { .. } => {
            let stats = config.exporter().export_all(store, decoder)?;
            Ok(Outcome::Dumped(stats))
        }
    }
}

fn list<S, W>(store: &mut S, prefix: &str, out: &mut W) -> CliResult<u64>
where
    S: KeyValueStore + ?Sized,
    W: Write + ?Sized,
{
    let keys = inspect::list_keys(store, prefix)
        .map_err(|e| CliError::from_query(&format!("list {}", prefix), e))?;
    let count = write_lines(keys, out)?;

    let count_str = count.to_string();
    log_event_with_fields(
        Event::ListComplete,
        &[("count", count_str.as_str()), ("prefix", prefix)],
    );

    Ok(count)
}
