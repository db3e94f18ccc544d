//! CLI module for etcdhelper
//!
//! Provides command-line interface for:
//! - list: Print keys, optionally under a prefix
//! - get: Print the decoded objects stored under a key
//! - dump: Export the keyspace to a directory tree

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ConnectionArgs};
pub use commands::{connect, run, run_cli, run_command, Outcome};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_lines;
