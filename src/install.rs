//! Install missing tools through their platform-specific shell commands.
//!
//! Every failure here is local to one tool: it is logged, recorded in the
//! [`InstallReport`], and the next tool is processed. Nothing in this module
//! terminates the process.
use std::collections::HashSet;

use crate::config::Tool;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::logging::{InstallStatus, Log};
use crate::platform::Platform;

/// Result of one attempted install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Tool that was installed.
    pub tool_name: String,
    /// Whether the command exited zero.
    pub succeeded: bool,
    /// Shell exit code; `-1` when killed by a signal or never launched.
    pub exit_code: i32,
}

/// Why a missing tool was not attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The tool declares no install commands.
    NoCommands,
    /// None of the declared commands matches this host.
    NoMatchingCommand,
    /// A dependency is missing and was not installed in this run.
    DependencyUnavailable {
        /// The dependency that is still missing.
        dependency: String,
    },
}

impl SkipReason {
    /// Short note for the summary and the diff preview.
    #[must_use]
    pub fn describe(&self, platform: &Platform) -> String {
        match self {
            Self::NoCommands => "no install command".to_string(),
            Self::NoMatchingCommand => format!("no command for {}", platform.identifier()),
            Self::DependencyUnavailable { dependency } => format!("needs {dependency}"),
        }
    }

    fn into_error(self, tool: &str, platform: &Platform) -> InstallError {
        let tool = tool.to_string();
        match self {
            Self::NoCommands => InstallError::NoCommands { tool },
            Self::NoMatchingCommand => InstallError::NoMatchingCommand {
                tool,
                platform: platform.identifier(),
            },
            Self::DependencyUnavailable { dependency } => {
                InstallError::DependencyUnavailable { tool, dependency }
            }
        }
    }
}

/// A missing tool the installer did not attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInstall {
    /// Tool that was skipped.
    pub tool_name: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Everything the installer did for one batch of missing tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Attempted installs, in order.
    pub outcomes: Vec<InstallOutcome>,
    /// Tools that were not attempted.
    pub skipped: Vec<SkippedInstall>,
    /// Tools whose command was only printed (dry run).
    pub previewed: Vec<String>,
}

impl InstallReport {
    /// `0` iff nothing was skipped and every attempted install succeeded.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_success())
    }

    /// Whether nothing was skipped and no attempted install failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty() && self.outcomes.iter().all(|o| o.succeeded)
    }

    /// Number of attempted installs that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded).count()
    }
}

/// What the installer will do for one missing tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Run this command line through the shell.
    Run(String),
    /// Leave the tool alone.
    Skip(SkipReason),
}

/// One step of an install plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstall {
    /// Tool the step is for.
    pub tool_name: String,
    /// What happens to it.
    pub action: PlannedAction,
}

/// Decide what to do for each tool in `missing`, in order, without running
/// anything.
///
/// A tool whose dependency is skipped is skipped as well.
#[must_use]
pub fn plan(missing: &[Tool], platform: &Platform) -> Vec<PlannedInstall> {
    let mut unavailable = HashSet::new();
    let mut steps = Vec::with_capacity(missing.len());
    for tool in missing {
        let action = select(tool, platform, &unavailable);
        if matches!(action, PlannedAction::Skip(_)) {
            unavailable.insert(tool.name.as_str());
        }
        steps.push(PlannedInstall {
            tool_name: tool.name.clone(),
            action,
        });
    }
    steps
}

/// Pick the action for `tool`, given the tools of this batch that are known
/// to stay missing.
fn select(tool: &Tool, platform: &Platform, unavailable: &HashSet<&str>) -> PlannedAction {
    if tool.install_commands.is_empty() {
        return PlannedAction::Skip(SkipReason::NoCommands);
    }
    let Some(command) = tool.command_for(platform) else {
        return PlannedAction::Skip(SkipReason::NoMatchingCommand);
    };
    if let Some(dependency) = tool
        .dependencies
        .iter()
        .find(|d| unavailable.contains(d.as_str()))
    {
        return PlannedAction::Skip(SkipReason::DependencyUnavailable {
            dependency: dependency.clone(),
        });
    }
    PlannedAction::Run(command.command_line.clone())
}

/// Runs install commands for missing tools, one at a time, in order.
#[derive(Debug)]
pub struct Installer<'a> {
    platform: &'a Platform,
    executor: &'a dyn Executor,
    dry_run: bool,
}

impl<'a> Installer<'a> {
    /// Create an installer for `platform` that runs commands through
    /// `executor`, or only prints them when `dry_run` is set.
    #[must_use]
    pub const fn new(platform: &'a Platform, executor: &'a dyn Executor, dry_run: bool) -> Self {
        Self {
            platform,
            executor,
            dry_run,
        }
    }

    /// Install every tool in `missing`, in order.
    ///
    /// Each tool ends up in exactly one of the report's lists. A tool whose
    /// dependency was skipped or failed earlier in the batch is skipped. An
    /// empty input runs nothing and yields an empty, successful report.
    pub fn install_missing(&self, missing: &[Tool], log: &dyn Log) -> InstallReport {
        let mut report = InstallReport::default();
        let mut unavailable = HashSet::new();
        for tool in missing {
            let installed = match select(tool, self.platform, &unavailable) {
                PlannedAction::Skip(reason) => {
                    self.skip(tool, reason, log, &mut report);
                    false
                }
                PlannedAction::Run(command) => self.run(tool, &command, log, &mut report),
            };
            if !installed {
                unavailable.insert(tool.name.as_str());
            }
        }
        report
    }

    fn skip(&self, tool: &Tool, reason: SkipReason, log: &dyn Log, report: &mut InstallReport) {
        log.record_install(
            &tool.name,
            InstallStatus::Skipped,
            Some(&reason.describe(self.platform)),
        );
        report.skipped.push(SkippedInstall {
            tool_name: tool.name.clone(),
            reason: reason.clone(),
        });
        log.warn(&reason.into_error(&tool.name, self.platform).to_string());
    }

    /// Run (or preview) `command`. Returns whether the tool can be counted
    /// on by later dependents.
    fn run(&self, tool: &Tool, command: &str, log: &dyn Log, report: &mut InstallReport) -> bool {
        if !tool.dependencies.is_empty() {
            log.debug(&format!(
                "{} requires {}",
                tool.name,
                tool.dependencies.join(", ")
            ));
        }

        if self.dry_run {
            log.dry_run(&format!("would install {}: {command}", tool.name));
            log.record_install(&tool.name, InstallStatus::DryRun, None);
            report.previewed.push(tool.name.clone());
            return true;
        }

        log.info(&format!("installing {}", tool.name));
        log.debug(&format!("running: {command}"));
        let outcome = match self.executor.run_shell(command) {
            Ok(result) if result.success => {
                log.record_install(&tool.name, InstallStatus::Installed, None);
                InstallOutcome {
                    tool_name: tool.name.clone(),
                    succeeded: true,
                    exit_code: result.exit_code(),
                }
            }
            Ok(result) => {
                let err = InstallError::CommandFailed {
                    tool: tool.name.clone(),
                    code: result.exit_code(),
                };
                log.error(&err.to_string());
                log.record_install(
                    &tool.name,
                    InstallStatus::Failed,
                    Some(&format!("exit {}", result.exit_code())),
                );
                InstallOutcome {
                    tool_name: tool.name.clone(),
                    succeeded: false,
                    exit_code: result.exit_code(),
                }
            }
            Err(e) => {
                let err = InstallError::Spawn {
                    tool: tool.name.clone(),
                    reason: format!("{e:#}"),
                };
                log.error(&err.to_string());
                log.record_install(&tool.name, InstallStatus::Failed, Some("not launched"));
                InstallOutcome {
                    tool_name: tool.name.clone(),
                    succeeded: false,
                    exit_code: -1,
                }
            }
        };
        let succeeded = outcome.succeeded;
        report.outcomes.push(outcome);
        succeeded
    }
}
