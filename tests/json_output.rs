#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! End-to-end tests for `--json` reports: the `spinup` binary runs with
//! verbose logging and stdout must still be a single JSON document.

mod common;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use common::*;

fn spinup_bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_spinup"))
}

/// Run `spinup <args> -v --config <registry>` with the cache redirected
/// into `cache`.
fn run_verbose(args: &[&str], registry: &Path, cache: &Path) -> Output {
    Command::new(spinup_bin_path())
        .args(args)
        .arg("-v")
        .arg("--config")
        .arg(registry)
        .env("XDG_CACHE_HOME", cache)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SPINUP_CONFIG")
        .output()
        .expect("spawn spinup")
}

/// A registry with one tool that is always present and one that never is.
fn write_mixed_registry(dir: &Path) -> PathBuf {
    write_registry(
        dir,
        "[[tool]]\nname = \"shell\"\npackage = \"sh\"\n\n[[tool]]\nname = \"spinup-absent-tool\"\n\n[[tool.install]]\nplatform = \"*\"\ncommand = \"echo never-run\"\n",
    )
}

#[cfg(unix)]
#[test]
fn check_json_keeps_logs_off_stdout() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = write_mixed_registry(tmp.path());
    let output = run_verbose(&["check", "--json"], &registry, tmp.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be exactly one JSON document");
    assert_eq!(value["installed"], serde_json::json!(["shell"]));
    assert_eq!(value["missing"], serde_json::json!(["spinup-absent-tool"]));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("loading tools from"), "debug output goes to stderr");
}

#[cfg(unix)]
#[test]
fn diff_json_previews_without_running() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = write_mixed_registry(tmp.path());
    let output = run_verbose(&["diff", "--json"], &registry, tmp.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("never-run\n"), "the command is only listed");
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["commands"][0]["name"], "spinup-absent-tool");
    assert_eq!(value["commands"][0]["command"], "echo never-run");
}

#[cfg(unix)]
#[test]
fn plain_check_still_logs_to_stdout() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = write_mixed_registry(tmp.path());
    let output = run_verbose(&["check"], &registry, tmp.path());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("| Installed | Missing"));
    assert!(stdout.contains("1 of 2 tools installed"));
}
