//! Command: interactive menu.
//!
//! An explicit read/dispatch loop: each line read is parsed into a
//! [`MenuChoice`]; unknown input re-prompts, `Exit` or end of input stops.
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

use super::{Context, Outcome, check, info, install};
use crate::cli::CheckOpts;

const PROMPT: &str = "\
What would you like to do?
  1) Check installed tools
  2) Install missing tools
  3) Show system information
  4) Exit
> ";

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Show the status table.
    Check,
    /// Install missing tools.
    Install,
    /// Show the banner and system information.
    Info,
    /// Leave the menu.
    Exit,
}

/// Input that names no menu entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown choice '{0}'")]
pub struct UnknownChoice(pub String);

impl FromStr for MenuChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "check" => Ok(Self::Check),
            "2" | "install" => Ok(Self::Install),
            "3" | "info" => Ok(Self::Info),
            "4" | "q" | "quit" | "exit" => Ok(Self::Exit),
            other => Err(UnknownChoice(other.to_string())),
        }
    }
}

/// Prompt, read a choice, run it; repeat until `Exit` or end of input.
///
/// Returns the worst outcome of the actions that ran.
///
/// # Errors
///
/// Returns the first fatal error raised by an action, or an I/O error on
/// the input or output stream.
pub fn run(ctx: &Context<'_>, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<Outcome> {
    let mut worst = Outcome::Success;
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                ctx.log.warn(&e.to_string());
                continue;
            }
        };
        ctx.log.debug(&format!("menu choice: {choice:?}"));

        let outcome = match choice {
            MenuChoice::Check => check::run(ctx, &CheckOpts::default(), out)?,
            MenuChoice::Install => install::run(ctx, out)?,
            MenuChoice::Info => info::run(ctx, out)?,
            MenuChoice::Exit => break,
        };
        worst = worst.max(outcome);
        writeln!(out)?;
    }
    Ok(worst)
}
