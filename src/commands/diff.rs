//! Command: preview the install commands for missing tools.
//!
//! Reconciles and plans exactly like `install`, but never spawns a process.
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::{Context, Outcome};
use crate::cli::DiffOpts;
use crate::install::{PlannedAction, PlannedInstall, plan};
use crate::reconcile::{ReconciliationReport, reconcile};
use crate::render::render_plan;

/// JSON shape of the preview.
#[derive(Debug, Serialize)]
struct DiffDocument<'a> {
    platform: String,
    installed: Vec<&'a str>,
    commands: Vec<PlannedCommand<'a>>,
    skipped: Vec<PlannedSkip<'a>>,
}

#[derive(Debug, Serialize)]
struct PlannedCommand<'a> {
    name: &'a str,
    command: &'a str,
}

#[derive(Debug, Serialize)]
struct PlannedSkip<'a> {
    name: &'a str,
    reason: String,
}

/// Print what `install` would run for each missing tool.
///
/// A preview never fails on missing or uninstallable tools.
///
/// # Errors
///
/// Returns an error if the search path cannot be read or stdout fails.
pub fn run(ctx: &Context<'_>, opts: &DiffOpts, out: &mut dyn Write) -> Result<Outcome> {
    let report = reconcile(ctx.registry.tools(), ctx.probe)?;
    let steps = plan(&report.missing, ctx.platform);
    ctx.log.debug(&format!(
        "{} of {} tools missing on {}",
        steps.len(),
        report.total(),
        ctx.platform.identifier()
    ));

    if opts.json {
        let doc = document(ctx, &report, &steps);
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_plan(&steps, ctx.platform, ctx.style))?;
    }
    Ok(Outcome::Success)
}

fn document<'a>(
    ctx: &Context<'_>,
    report: &'a ReconciliationReport,
    steps: &'a [PlannedInstall],
) -> DiffDocument<'a> {
    let mut doc = DiffDocument {
        platform: ctx.platform.identifier(),
        installed: report.installed.iter().map(|t| t.name.as_str()).collect(),
        commands: Vec::new(),
        skipped: Vec::new(),
    };
    for step in steps {
        match &step.action {
            PlannedAction::Run(command) => doc.commands.push(PlannedCommand {
                name: &step.tool_name,
                command,
            }),
            PlannedAction::Skip(reason) => doc.skipped.push(PlannedSkip {
                name: &step.tool_name,
                reason: reason.describe(ctx.platform),
            }),
        }
    }
    doc
}
