//! Command-line interface: global options and subcommands.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the workstation onboarding tool.
#[derive(Parser, Debug)]
#[command(
    name = "spinup",
    about = "Check a workstation for developer tools and install the missing ones",
    version
)]
pub struct Cli {
    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options accepted by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to execute, `run` when none was given.
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Tool registry to use: a TOML file path or an http(s) URL
    #[arg(long, global = true, env = "SPINUP_CONFIG")]
    pub config: Option<String>,

    /// Override the detected distro identifier (e.g. fedora, ubuntu)
    #[arg(long, global = true)]
    pub platform: Option<String>,

    /// Preview install commands without running them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the system, check every tool and install the missing ones
    Run(RunOpts),
    /// Report which tools are installed and which are missing
    Check(CheckOpts),
    /// Install missing tools without the banner and system summary
    Install,
    /// Show the install commands that would run, without running them
    Diff(DiffOpts),
    /// Show the banner and system information
    Info,
    /// Choose actions from an interactive menu
    Menu,
    /// Print version information
    Version,
    /// Generate shell completions
    Completions(CompletionsOpts),
}

impl Default for Command {
    fn default() -> Self {
        Self::Run(RunOpts::default())
    }
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Run(_) => "run",
            Self::Check(_) => "check",
            Self::Install => "install",
            Self::Diff(_) => "diff",
            Self::Info => "info",
            Self::Menu => "menu",
            Self::Version => "version",
            Self::Completions(_) => "completions",
        }
    }

    /// Whether stdout carries a JSON document, so logging must stay off it.
    #[must_use]
    pub const fn writes_json(&self) -> bool {
        match self {
            Self::Check(opts) => opts.json,
            Self::Diff(opts) => opts.json,
            _ => false,
        }
    }
}

/// Options for the `run` subcommand.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOpts {
    /// Clear the terminal before printing
    #[arg(long)]
    pub clear: bool,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOpts {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `diff` subcommand.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOpts {
    /// Print the planned commands as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct CompletionsOpts {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
