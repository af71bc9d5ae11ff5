// Shared helpers for integration tests.
//
// Provides a fake host that acts as both prober and executor, so install
// commands change what later probes see, plus helpers for writing registry
// files into temporary directories.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use spinup_cli::commands::Context;
use spinup_cli::config::Registry;
use spinup_cli::error::ProbeError;
use spinup_cli::exec::{ExecResult, Executor};
use spinup_cli::logging::Logger;
use spinup_cli::platform::{Os, Platform};
use spinup_cli::probe::{CheckResult, Probe};
use spinup_cli::render::Style;

/// A simulated host.
///
/// Tools in `installed` are found by [`Probe::probe`]. Running
/// `install <name>` adds `<name>` to `installed` unless it is listed in
/// `broken`, in which case the command exits 1. Every command line run is
/// recorded in `calls`.
#[derive(Debug, Default)]
pub struct FakeHost {
    installed: RefCell<HashSet<String>>,
    broken: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn with_installed(names: &[&str]) -> Self {
        Self {
            installed: RefCell::new(names.iter().map(|n| (*n).to_string()).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn broken(mut self, names: &[&str]) -> Self {
        self.broken = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Probe for FakeHost {
    fn probe(&self, tool_name: &str) -> Result<CheckResult, ProbeError> {
        Ok(if self.installed.borrow().contains(tool_name) {
            CheckResult::found(
                tool_name.to_string(),
                PathBuf::from("/usr/bin").join(tool_name),
            )
        } else {
            CheckResult::missing(tool_name.to_string())
        })
    }
}

impl Executor for FakeHost {
    fn run_shell(&self, command_line: &str) -> anyhow::Result<ExecResult> {
        self.calls.borrow_mut().push(command_line.to_string());
        let Some(name) = command_line.strip_prefix("install ") else {
            anyhow::bail!("unknown command: {command_line}");
        };
        if self.broken.contains(name) {
            return Ok(ExecResult {
                success: false,
                code: Some(1),
            });
        }
        self.installed.borrow_mut().insert(name.to_string());
        Ok(ExecResult {
            success: true,
            code: Some(0),
        })
    }
}

/// A Fedora host.
pub fn fedora() -> Platform {
    Platform::from_os_release(
        Os::Linux,
        "NAME=\"Fedora Linux\"\nID=fedora\nVERSION_ID=40\nPRETTY_NAME=\"Fedora Linux 40\"\n",
    )
}

/// Registry where every tool installs with `install <name>` on any platform.
pub fn registry_toml(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| {
            format!(
                "[[tool]]\nname = \"{name}\"\n\n[[tool.install]]\nplatform = \"*\"\ncommand = \"install {name}\"\n\n"
            )
        })
        .collect()
}

pub fn registry(names: &[&str]) -> Registry {
    Registry::from_toml_str(&registry_toml(names), "test").expect("valid registry")
}

/// Write `content` as `tools.toml` under `dir` and return its path.
pub fn write_registry(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("tools.toml");
    std::fs::write(&path, content).expect("write tools.toml");
    path
}

/// Logger with no log file; events go nowhere without a subscriber.
pub fn quiet_logger() -> Logger {
    Logger::with_log_file(None)
}

/// Build a plain-style context over `host`.
pub fn context<'a>(
    platform: &'a Platform,
    registry: &'a Registry,
    host: &'a FakeHost,
    log: &'a Logger,
    dry_run: bool,
) -> Context<'a> {
    Context {
        platform,
        registry,
        probe: host,
        executor: host,
        log,
        style: Style::PLAIN,
        dry_run,
    }
}
