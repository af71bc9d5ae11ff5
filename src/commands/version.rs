//! Command: print version information.
use std::io::Write;

use anyhow::Result;

use super::Outcome;
use crate::metadata::Metadata;

/// Print `spinup <version>`.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run(out: &mut dyn Write) -> Result<Outcome> {
    let meta = Metadata::current();
    writeln!(out, "{} {}", meta.name, meta.version)?;
    Ok(Outcome::Success)
}
