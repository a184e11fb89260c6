use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Name completions are registered under
pub const BIN_NAME: &str = "folio";

/// Print shell completion script to stdout
pub fn print_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();

    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    Ok(())
}
