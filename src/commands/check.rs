//! Command: report which tools are installed.
use std::io::Write;

use anyhow::Result;

use super::{Context, Outcome};
use crate::cli::CheckOpts;
use crate::reconcile::reconcile;
use crate::render::render_table;

/// Print the status table, or the JSON report with `--json`.
///
/// Missing tools are not a failure here; only fatal errors are.
///
/// # Errors
///
/// Returns an error if the search path cannot be read or stdout fails.
pub fn run(ctx: &Context<'_>, opts: &CheckOpts, out: &mut dyn Write) -> Result<Outcome> {
    let report = reconcile(ctx.registry.tools(), ctx.probe)?;
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &report.to_status())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_table(&report, ctx.style))?;
        ctx.log.info(&format!(
            "{} of {} tools installed",
            report.installed.len(),
            report.total()
        ));
    }
    Ok(Outcome::Success)
}
