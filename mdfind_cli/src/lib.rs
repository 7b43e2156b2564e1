//! mdfind command line interface library
//!
//! Exposes the command handlers and their supporting modules so they can be
//! exercised from integration tests.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod paths;
pub mod terminal;

pub use error::{CliError, CliResult, ExitCode};
