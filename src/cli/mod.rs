//! CLI module for tensorize
//!
//! Parses arguments, assembles the tensor configuration, and drives the
//! two-pass conversion pipeline. All failure reporting and the decision to
//! exit non-zero happen at this layer; the subsystems below only return
//! typed errors.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{build_config, convert, run};
pub use errors::{CliError, CliErrorCode, CliResult};
