//! Command: generate shell completions.
use std::io::Write;

use anyhow::Result;
use clap::CommandFactory as _;
use clap_complete::Shell;

use super::Outcome;
use crate::cli::Cli;

/// Write the completion script for `shell`.
///
/// # Errors
///
/// Infallible in practice; the signature matches the other commands.
pub fn run(shell: Shell, out: &mut dyn Write) -> Result<Outcome> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
    Ok(Outcome::Success)
}
