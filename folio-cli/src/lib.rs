//! Folio CLI Library
//!
//! Argument parsing, prompting, output formatting and exit codes for the
//! `folio` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Shell completion generation
pub mod completions;
/// `folio domain`
pub mod domain;
/// `folio edit`
pub mod edit;
/// CLI error type and exit code mapping
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// `folio find`
pub mod find;
/// Subscriber setup
pub mod logging;
/// `folio new`
pub mod new;
/// Terminal input provider
pub mod prompt;
