//! Configuration file and flag overlay
//!
//! Every field has a default, so running without `--config` is the common
//! case. Values from the file are overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::{GroupVersionKind, Scheme};
use crate::export::{Exporter, DEFAULT_EXTENSION};
use crate::store::{ConnectionSettings, SortOrder};

use super::args::{Cli, Command, ConnectionArgs};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cluster endpoints
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// TLS client certificate
    #[serde(default)]
    pub cert: Option<PathBuf>,

    /// TLS client key
    #[serde(default)]
    pub key: Option<PathBuf>,

    /// Server TLS CA certificate
    #[serde(default)]
    pub cacert: Option<PathBuf>,

    /// Connection establishment timeout (default 5s)
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,

    /// Root of the exported tree (default: current directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension appended to exported files (default "yaml")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Order in which `dump` requests records (default descending by key)
    #[serde(default = "default_dump_order")]
    pub dump_order: SortOrder,

    /// Additional decodable kinds, as `group/version/Kind` or `version/Kind`
    #[serde(default)]
    pub extra_kinds: Vec<String>,
}

fn default_endpoints() -> Vec<String> {
    vec!["https://127.0.0.1:2379".to_string()]
}
fn default_dial_timeout_ms() -> u64 {
    5000
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}
fn default_dump_order() -> SortOrder {
    SortOrder::Descend
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            cert: None,
            key: None,
            cacert: None,
            dial_timeout_ms: default_dial_timeout_ms(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            dump_order: default_dump_order(),
            extra_kinds: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Build the effective configuration for a parsed command line and validate it.
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_connection(&cli.connection);
        if let Command::Dump {
            output_dir,
            extension,
            order,
        } = &cli.command
        {
            config.apply_dump(output_dir.as_deref(), extension.as_deref(), *order);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_connection(&mut self, args: &ConnectionArgs) {
        let endpoints: Vec<String> = args
            .endpoints
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
        if !endpoints.is_empty() {
            self.endpoints = endpoints;
        }
        if let Some(cert) = &args.cert_file {
            self.cert = Some(cert.clone());
        }
        if let Some(key) = &args.key_file {
            self.key = Some(key.clone());
        }
        if let Some(cacert) = &args.cacert_file {
            self.cacert = Some(cacert.clone());
        }
        if let Some(timeout) = args.dial_timeout_ms {
            self.dial_timeout_ms = timeout;
        }
    }

    fn apply_dump(&mut self, output_dir: Option<&Path>, extension: Option<&str>, order: Option<SortOrder>) {
        if let Some(dir) = output_dir {
            self.output_dir = dir.to_path_buf();
        }
        if let Some(extension) = extension {
            self.extension = extension.to_string();
        }
        if let Some(order) = order {
            self.dump_order = order;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.endpoints.is_empty() || self.endpoints.iter().any(|e| e.trim().is_empty()) {
            return Err(CliError::config_error("At least one non-empty endpoint is required"));
        }

        if self.dial_timeout_ms == 0 {
            return Err(CliError::config_error("dial_timeout_ms must be > 0"));
        }

        match (&self.cert, &self.key) {
            (Some(_), None) => {
                return Err(CliError::config_error(
                    "A TLS client certificate requires a client key (--key)",
                ))
            }
            (None, Some(_)) => {
                return Err(CliError::config_error(
                    "A TLS client key requires a client certificate (--cert)",
                ))
            }
            _ => {}
        }

        if self.extension.is_empty() {
            return Err(CliError::config_error("extension must not be empty"));
        }
        if self.extension.starts_with('.') || self.extension.contains(['/', '\\']) {
            return Err(CliError::config_error(format!(
                "Invalid extension: '{}'. Give the bare extension, e.g. 'yaml'.",
                self.extension
            )));
        }

        self.scheme()?;

        Ok(())
    }

    /// Connection parameters for the store adapter
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            endpoints: self.endpoints.clone(),
            dial_timeout: Duration::from_millis(self.dial_timeout_ms),
            cert: self.cert.clone(),
            key: self.key.clone(),
            cacert: self.cacert.clone(),
        }
    }

    /// The built-in scheme plus any configured extra kinds
    pub fn scheme(&self) -> CliResult<Scheme> {
        let mut scheme = Scheme::builtin();
        for spec in &self.extra_kinds {
            let gvk = GroupVersionKind::parse(spec)
                .map_err(|e| CliError::config_error(e.to_string()))?;
            scheme.register(gvk);
        }
        Ok(scheme)
    }

    /// Exporter writing under the configured output directory
    pub fn exporter(&self) -> Exporter {
        Exporter::new(&self.output_dir)
            .with_extension(&self.extension)
            .with_order(self.dump_order)
    }
}
