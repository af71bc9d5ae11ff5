#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `install` command: reconcile, install the
//! missing tools, and report.

mod common;

use common::*;
use spinup_cli::cli::Command;
use spinup_cli::commands::{self, Outcome};
use spinup_cli::config::Registry;

fn install(host: &FakeHost, registry: &Registry, dry_run: bool) -> (Outcome, String) {
    let platform = fedora();
    let log = quiet_logger();
    let ctx = context(&platform, registry, host, &log, dry_run);
    let mut out = Vec::new();
    let outcome = commands::execute(&ctx, &Command::Install, &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn installs_missing_tools_in_registry_order() {
    let host = FakeHost::with_installed(&["git"]);
    let registry = registry(&["git", "node", "npm", "docker"]);
    let (outcome, out) = install(&host, &registry, false);

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(
        host.calls(),
        vec!["install node", "install npm", "install docker"]
    );
    assert!(!out.contains('✗'), "every tool should be installed afterwards");
    assert!(out.contains("| ✓ docker  |"));
}

#[test]
fn already_installed_runs_nothing() {
    let host = FakeHost::with_installed(&["git", "node"]);
    let (outcome, _) = install(&host, &registry(&["git", "node"]), false);
    assert_eq!(outcome, Outcome::Success);
    assert!(host.calls().is_empty());
}

#[test]
fn failure_does_not_stop_later_tools() {
    let host = FakeHost::with_installed(&[]).broken(&["node"]);
    let registry = registry(&["node", "docker"]);
    let (outcome, out) = install(&host, &registry, false);

    assert_eq!(outcome, Outcome::Incomplete);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(host.calls(), vec!["install node", "install docker"]);
    assert!(out.contains("| ✓ docker  | ✗ node  |"));
}

#[test]
fn dry_run_spawns_nothing() {
    let host = FakeHost::with_installed(&["git"]);
    let (outcome, out) = install(&host, &registry(&["git", "node"]), true);
    assert_eq!(outcome, Outcome::Success);
    assert!(host.calls().is_empty());
    assert!(out.contains("✗ node"), "nothing changes in a dry run");
}

#[test]
fn no_command_for_platform_is_incomplete() {
    let host = FakeHost::with_installed(&[]);
    let registry = Registry::from_toml_str(
        "[[tool]]\nname = \"pacman-only\"\n\n[[tool.install]]\nplatform = \"arch\"\ncommand = \"install pacman-only\"\n",
        "test",
    )
    .unwrap();
    let (outcome, _) = install(&host, &registry, false);
    assert_eq!(outcome, Outcome::Incomplete);
    assert!(host.calls().is_empty());
}

#[test]
fn tool_without_commands_is_incomplete() {
    let host = FakeHost::with_installed(&[]);
    let registry = Registry::from_toml_str("[[tool]]\nname = \"zsh\"\n", "test").unwrap();
    let platform = fedora();
    let log = quiet_logger();
    let ctx = context(&platform, &registry, &host, &log, false);
    let mut out = Vec::new();
    let outcome = commands::execute(&ctx, &Command::Install, &mut out).unwrap();
    assert_eq!(outcome, Outcome::Incomplete);
    assert!(host.calls().is_empty());
    assert!(log.entries().is_empty(), "summary consumes the recorded installs");
}

#[test]
fn empty_registry_succeeds() {
    let host = FakeHost::with_installed(&[]);
    let (outcome, out) = install(&host, &registry(&[]), false);
    assert_eq!(outcome, Outcome::Success);
    assert!(out.contains("| Installed | Missing |"));
}

#[test]
fn failed_dependency_skips_dependent_tool() {
    let host = FakeHost::with_installed(&[]).broken(&["node"]);
    let registry = Registry::from_toml_str(
        &format!(
            "{}[[tool]]\nname = \"npm\"\ndependencies = [\"node\"]\n\n[[tool.install]]\nplatform = \"*\"\ncommand = \"install npm\"\n",
            registry_toml(&["node"])
        ),
        "test",
    )
    .unwrap();
    let (outcome, out) = install(&host, &registry, false);
    assert_eq!(outcome, Outcome::Incomplete);
    assert_eq!(host.calls(), vec!["install node"]);
    assert!(out.contains("✗ npm"));
}
