//! Subcommand orchestration: shared setup, the [`Context`] every command
//! runs against, and the mapping from outcomes to exit codes.
pub mod check;
pub mod completions;
pub mod diff;
pub mod info;
pub mod install;
pub mod menu;
pub mod run;
pub mod version;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;

use crate::cli::{Command, GlobalOpts};
use crate::config::validation;
use crate::config::{ConfigSource, Registry};
use crate::exec::{Executor, SystemExecutor};
use crate::install::InstallReport;
use crate::logging::Logger;
use crate::platform::Platform;
use crate::probe::{PathProbe, Probe};
use crate::render::Style;

/// How a command ended, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    /// Everything requested succeeded.
    Success,
    /// At least one missing tool was skipped or failed to install.
    Incomplete,
}

impl Outcome {
    /// Process exit code: `0` for success, `1` otherwise.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Incomplete => 1,
        }
    }
}

impl From<&InstallReport> for Outcome {
    fn from(report: &InstallReport) -> Self {
        if report.exit_code() == 0 {
            Self::Success
        } else {
            Self::Incomplete
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.exit_code())
    }
}

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform, with any `--platform` override applied.
    pub platform: Platform,
    /// Loaded tool registry.
    pub registry: Registry,
}

impl CommandSetup {
    /// Detect the platform and load the tool registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read, fetched or parsed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let mut platform = Platform::detect();
        if let Some(id) = global.platform.as_deref() {
            platform = platform.with_identifier(id);
        }
        log.debug(&format!("platform: {}", platform.identifier()));

        let source = ConfigSource::from_arg(global.config.as_deref());
        log.debug(&format!("loading tools from {source}"));
        let registry = Registry::load(&source)?;
        log.debug(&format!("{} tools registered", registry.len()));

        // The installer warns about the ones that are actually missing.
        for warning in validation::warnings(registry.tools(), &platform) {
            log.debug(&format!("{}: {}", warning.tool, warning.message));
        }

        Ok(Self { platform, registry })
    }
}

/// Everything a command needs to do its work.
#[derive(Debug)]
pub struct Context<'a> {
    /// Platform install commands are matched against.
    pub platform: &'a Platform,
    /// Tools to check.
    pub registry: &'a Registry,
    /// Finds tools on the host.
    pub probe: &'a dyn Probe,
    /// Runs install commands.
    pub executor: &'a dyn Executor,
    /// Logger for progress and the install summary.
    pub log: &'a Logger,
    /// Colour for reports written to stdout.
    pub style: Style,
    /// Print install commands instead of running them.
    pub dry_run: bool,
}

/// Run `command` against the real host.
///
/// # Errors
///
/// Returns an error for fatal conditions: unreadable configuration, missing
/// `PATH`, or a failed write to stdout.
pub fn dispatch(
    global: &GlobalOpts,
    command: &Command,
    log: &Logger,
    style: Style,
) -> Result<Outcome> {
    let mut out = std::io::stdout().lock();
    match command {
        Command::Version => version::run(&mut out),
        Command::Completions(opts) => completions::run(opts.shell, &mut out),
        Command::Run(_)
        | Command::Check(_)
        | Command::Install
        | Command::Diff(_)
        | Command::Info
        | Command::Menu => {
            let setup = CommandSetup::init(global, log)?;
            let probe = PathProbe::from_env()?;
            let ctx = Context {
                platform: &setup.platform,
                registry: &setup.registry,
                probe: &probe,
                executor: &SystemExecutor,
                log,
                style,
                dry_run: global.dry_run,
            };
            execute(&ctx, command, &mut out)
        }
    }
}

/// Run `command` with the collaborators in `ctx`, writing reports to `out`.
///
/// # Errors
///
/// See [`dispatch`].
pub fn execute(ctx: &Context<'_>, command: &Command, out: &mut dyn Write) -> Result<Outcome> {
    match command {
        Command::Run(opts) => run::run(ctx, opts, out),
        Command::Check(opts) => check::run(ctx, opts, out),
        Command::Install => install::run(ctx, out),
        Command::Diff(opts) => diff::run(ctx, opts, out),
        Command::Info => info::run(ctx, out),
        Command::Menu => menu::run(ctx, &mut std::io::stdin().lock(), out),
        Command::Version => version::run(out),
        Command::Completions(opts) => completions::run(opts.shell, out),
    }
}
