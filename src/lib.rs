//! Developer workstation onboarding.
//!
//! Checks a host for a registry of developer tools, reports which are
//! installed and which are missing, and installs the missing ones with the
//! shell command declared for the current platform.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load and validate the TOML tool registry
//! - **[`probe`]** and **[`reconcile`]**: find tools on `PATH` and split the registry
//! - **[`install`]**: run platform install commands through an [`exec::Executor`]
//! - **[`render`]**: tables, banner and system summary for the terminal
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod install;
pub mod logging;
pub mod metadata;
pub mod platform;
pub mod probe;
pub mod reconcile;
pub mod render;
pub mod sysinfo;
