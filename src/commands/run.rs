//! Command: the full onboarding flow.
use std::io::Write;

use anyhow::Result;

use super::{Context, Outcome, info};
use crate::cli::RunOpts;
use crate::render::CLEAR_SCREEN;

/// Banner, system summary, then check and install.
///
/// # Errors
///
/// See [`super::install::run`].
pub fn run(ctx: &Context<'_>, opts: &RunOpts, out: &mut dyn Write) -> Result<Outcome> {
    if opts.clear {
        write!(out, "{CLEAR_SCREEN}")?;
    }
    info::run(ctx, out)?;
    writeln!(out)?;
    super::install::run(ctx, out)
}
