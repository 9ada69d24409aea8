//! CLI module for childtree
//!
//! Provides command-line interface for:
//! - serve: Seed both stores and run the HTTP server
//! - inspect: Load a seed file into one tree and print it

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{boot_stores, inspect, inspect_report, read_seed, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
