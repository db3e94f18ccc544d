//! CLI argument definitions using clap
//!
//! Commands:
//! - etcdhelper list [prefix]
//! - etcdhelper get <key>
//! - etcdhelper dump [--output-dir <dir>] [--extension <ext>] [--order asc|desc]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::store::SortOrder;

/// Inspect and export the contents of an etcd keyspace
#[derive(Parser, Debug)]
#[command(name = "etcdhelper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file; flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit lifecycle and per-record diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// How to reach the cluster
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// Etcd endpoint(s), comma separated [default: https://127.0.0.1:2379]
    #[arg(long = "endpoint", value_delimiter = ',', global = true)]
    pub endpoints: Vec<String>,

    /// TLS client key
    #[arg(long = "key", value_name = "PATH", global = true)]
    pub key_file: Option<PathBuf>,

    /// TLS client certificate
    #[arg(long = "cert", value_name = "PATH", global = true)]
    pub cert_file: Option<PathBuf>,

    /// Server TLS CA certificate
    #[arg(long = "cacert", value_name = "PATH", global = true)]
    pub cacert_file: Option<PathBuf>,

    /// Connection establishment timeout in milliseconds [default: 5000]
    #[arg(long, global = true)]
    pub dial_timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List keys, one per line
    #[command(visible_alias = "ls")]
    List {
        /// Only list keys starting with this prefix; lists every key when omitted
        prefix: Option<String>,
    },

    /// Print the decoded objects stored under a key
    Get {
        /// Exact key to fetch
        key: String,
    },

    /// Export the whole keyspace to files mirroring the key hierarchy
    Dump {
        /// Directory the key hierarchy is written under [default: .]
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Extension appended to every file [default: yaml]
        #[arg(long)]
        extension: Option<String>,

        /// Order records are requested in: asc, desc or none [default: desc]
        #[arg(long, value_parser = parse_sort_order)]
        order: Option<SortOrder>,
    },
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    SortOrder::parse(s).ok_or_else(|| format!("invalid order `{}`, expected asc, desc or none", s))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
