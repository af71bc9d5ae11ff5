//! Command: install missing tools.
use std::io::Write;

use anyhow::Result;

use super::{Context, Outcome};
use crate::install::Installer;
use crate::reconcile::reconcile;
use crate::render::{render_status_list, render_table};

/// Reconcile, install what is missing, then show the table again and the
/// install summary.
///
/// # Errors
///
/// Returns an error if the search path cannot be read or stdout fails.
/// Failed installs are not errors; they make the outcome incomplete.
pub fn run(ctx: &Context<'_>, out: &mut dyn Write) -> Result<Outcome> {
    let log = ctx.log;
    log.stage("Checking tools");
    let before = reconcile(ctx.registry.tools(), ctx.probe)?;
    for line in render_status_list(&before, ctx.style).lines() {
        log.info(line);
    }
    if before.all_installed() {
        write!(out, "{}", render_table(&before, ctx.style))?;
        log.info(&format!("all {} tools are installed", before.total()));
        return Ok(Outcome::Success);
    }
    log.info(&format!(
        "{} of {} tools missing",
        before.missing.len(),
        before.total()
    ));

    log.stage(if ctx.dry_run {
        "Installing missing tools (dry run)"
    } else {
        "Installing missing tools"
    });
    let installer = Installer::new(ctx.platform, ctx.executor, ctx.dry_run);
    let report = installer.install_missing(&before.missing, log);
    out.flush()?;

    log.stage("Status after install");
    let after = reconcile(ctx.registry.tools(), ctx.probe)?;
    write!(out, "{}", render_table(&after, ctx.style))?;
    out.flush()?;

    log.debug(&format!(
        "install pass done: {} failed, {} skipped, exit code {}",
        report.failure_count(),
        report.skipped.len(),
        report.exit_code()
    ));
    log.print_summary();
    Ok(Outcome::from(&report))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::{fedora, idle_executor, probe_with, registry};
    use crate::exec::{ExecResult, MockExecutor};
    use crate::logging::{Logger, isolated_logger};
    use crate::render::Style;
    use mockall::predicate::eq;

    fn logged(log: &Logger) -> String {
        std::fs::read_to_string(log.log_path().unwrap()).unwrap()
    }

    #[test]
    fn nothing_missing_runs_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        let platform = fedora();
        let registry = registry();
        let probe = probe_with(&["git", "node", "npm", "docker"]);
        let executor = idle_executor();
        let ctx = Context {
            platform: &platform,
            registry: &registry,
            probe: &probe,
            executor: &executor,
            log: &log,
            style: Style::PLAIN,
            dry_run: false,
        };
        let mut out = Vec::new();
        assert_eq!(run(&ctx, &mut out).unwrap(), Outcome::Success);
        assert!(log.entries().is_empty());
        assert!(logged(&log).contains("✓ docker"), "status list is logged");
    }

    #[test]
    fn installs_only_missing_tools() {
        let (log, _tmp, _guard) = isolated_logger();
        let platform = fedora();
        let registry = registry();
        let probe = probe_with(&["git", "npm"]);
        let mut executor = MockExecutor::new();
        executor
            .expect_run_shell()
            .with(eq("sudo dnf install -y nodejs"))
            .times(1)
            .returning(|_| Ok(ExecResult { success: true, code: Some(0) }));
        executor
            .expect_run_shell()
            .with(eq("sudo dnf install -y docker"))
            .times(1)
            .returning(|_| Ok(ExecResult { success: false, code: Some(1) }));
        let ctx = Context {
            platform: &platform,
            registry: &registry,
            probe: &probe,
            executor: &executor,
            log: &log,
            style: Style::PLAIN,
            dry_run: false,
        };
        let mut out = Vec::new();
        assert_eq!(run(&ctx, &mut out).unwrap(), Outcome::Incomplete);
        let logged = logged(&log);
        assert!(logged.contains("✓ node"));
        assert!(logged.contains("✗ docker (exit 1)"));
        assert!(logged.contains("2 tools: 1 installed, 0 skipped, 0 dry-run, 1 failed"));
        assert!(logged.contains("install pass done: 1 failed, 0 skipped, exit code 1"));
        assert!(String::from_utf8(out).unwrap().contains("| Installed | Missing  |"));
    }

    #[test]
    fn dry_run_succeeds_without_subprocess() {
        let (log, _tmp, _guard) = isolated_logger();
        let platform = fedora();
        let registry = registry();
        let probe = probe_with(&["git"]);
        let executor = idle_executor();
        let ctx = Context {
            platform: &platform,
            registry: &registry,
            probe: &probe,
            executor: &executor,
            log: &log,
            style: Style::PLAIN,
            dry_run: true,
        };
        let mut out = Vec::new();
        assert_eq!(run(&ctx, &mut out).unwrap(), Outcome::Success);
        assert!(logged(&log).contains("3 tools: 0 installed, 0 skipped, 3 dry-run, 0 failed"));
    }

    #[test]
    fn unmatched_platform_is_incomplete() {
        let (log, _tmp, _guard) = isolated_logger();
        let platform = fedora().with_identifier("arch");
        let registry = registry();
        let probe = probe_with(&["git", "npm", "docker"]);
        let executor = idle_executor();
        let ctx = Context {
            platform: &platform,
            registry: &registry,
            probe: &probe,
            executor: &executor,
            log: &log,
            style: Style::PLAIN,
            dry_run: false,
        };
        let mut out = Vec::new();
        assert_eq!(run(&ctx, &mut out).unwrap(), Outcome::Incomplete);
        assert!(logged(&log).contains("○ node (no command for arch)"));
    }
}
