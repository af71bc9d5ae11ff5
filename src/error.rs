//! Domain-specific error types for spinup.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`], [`ProbeError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SpinupError
//! ├── Config(ConfigError)   — registry could not be read, fetched or parsed (fatal)
//! ├── Probe(ProbeError)     — executable search path unreadable (fatal)
//! └── Install(InstallError) — one tool could not be installed (tool-local)
//! ```
//!
//! [`InstallError`] never aborts a run: the installer logs it against the
//! tool and moves on to the next one.

use thiserror::Error;

/// Top-level error type for spinup.
#[derive(Error, Debug)]
pub enum SpinupError {
    /// Tool registry could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host environment could not be queried.
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// A single tool failed to install.
    #[error("Install error: {0}")]
    Install(#[from] InstallError),
}

/// Errors that arise while loading the tool registry.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The remote configuration could not be downloaded.
    #[error("cannot fetch configuration from {url}: {message}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Transport or HTTP status failure.
        message: String,
    },

    /// The document is not valid TOML or does not have the expected shape.
    #[error("invalid TOML in {origin}: {message}")]
    Parse {
        /// Where the document came from (path, URL or `built-in`).
        origin: String,
        /// Parser message.
        message: String,
    },

    /// The document parsed but violates a registry invariant.
    #[error("invalid configuration in {origin}: {message}")]
    Invalid {
        /// Where the document came from.
        origin: String,
        /// Which invariant was violated.
        message: String,
    },
}

/// Errors that prevent looking tools up at all.
///
/// A tool that simply is not on the search path is not an error; it is
/// reported as not installed.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// `PATH` is not set, so nothing can be resolved.
    #[error("executable search path is unavailable: PATH is not set")]
    SearchPathUnavailable,

    /// The working directory needed to resolve relative entries is gone.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Per-tool install failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    /// The install command ran and exited non-zero.
    #[error("install command for '{tool}' exited with code {code}")]
    CommandFailed {
        /// Tool being installed.
        tool: String,
        /// Exit code reported by the shell (`-1` when killed by a signal).
        code: i32,
    },

    /// The shell could not be started.
    #[error("cannot launch install command for '{tool}': {reason}")]
    Spawn {
        /// Tool being installed.
        tool: String,
        /// Launch failure.
        reason: String,
    },

    /// The tool declares no install commands at all.
    #[error("'{tool}' has no install command")]
    NoCommands {
        /// Tool that was skipped.
        tool: String,
    },

    /// The tool declares install commands, none of them for this host.
    #[error("'{tool}' has no install command for platform {platform}")]
    NoMatchingCommand {
        /// Tool that was skipped.
        tool: String,
        /// Identifier of the current platform.
        platform: String,
    },

    /// A dependency is missing and was not installed in this run.
    #[error("'{tool}' needs '{dependency}', which is not installed")]
    DependencyUnavailable {
        /// Tool that was skipped.
        tool: String,
        /// The dependency that is still missing.
        dependency: String,
    },
}
