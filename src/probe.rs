//! Availability probing: is an executable with this name on the search path?
use std::ffi::OsString;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ProbeError;

/// Outcome of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Display name of the tool.
    #[serde(rename = "name")]
    pub tool_name: String,
    /// Whether an executable was found.
    #[serde(rename = "installed")]
    pub is_installed: bool,
    /// Where the executable was found.
    pub path: Option<PathBuf>,
}

impl CheckResult {
    /// Result for a tool that was not found.
    #[must_use]
    pub const fn missing(tool_name: String) -> Self {
        Self {
            tool_name,
            is_installed: false,
            path: None,
        }
    }

    /// Result for a tool found at `path`.
    #[must_use]
    pub const fn found(tool_name: String, path: PathBuf) -> Self {
        Self {
            tool_name,
            is_installed: true,
            path: Some(path),
        }
    }
}

/// Checks whether a tool is available on the host.
#[cfg_attr(test, mockall::automock)]
pub trait Probe: std::fmt::Debug {
    /// Probe one tool by name. Never runs the tool.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] only when the host cannot be queried at all;
    /// a tool that is not found is `Ok` with `is_installed == false`.
    fn probe(&self, tool_name: &str) -> Result<CheckResult, ProbeError>;
}

/// [`Probe`] that resolves names against a captured search path using the
/// same rules as `which`.
#[derive(Debug, Clone)]
pub struct PathProbe {
    search_path: OsString,
    cwd: PathBuf,
}

impl PathProbe {
    /// Capture `PATH` and the working directory of the current process.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::SearchPathUnavailable`] if `PATH` is not set and
    /// [`ProbeError::CurrentDir`] if the working directory cannot be read.
    pub fn from_env() -> Result<Self, ProbeError> {
        let search_path = std::env::var_os("PATH").ok_or(ProbeError::SearchPathUnavailable)?;
        let cwd = std::env::current_dir().map_err(ProbeError::CurrentDir)?;
        Ok(Self { search_path, cwd })
    }

    /// Probe against an explicit search path (PATH syntax).
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            search_path: search_path.into(),
            cwd: cwd.into(),
        }
    }

    /// Resolve `name` to the first matching executable, if any.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.trim().is_empty() {
            return None;
        }
        which::which_in(name, Some(&self.search_path), &self.cwd).ok()
    }
}

impl Probe for PathProbe {
    fn probe(&self, tool_name: &str) -> Result<CheckResult, ProbeError> {
        let result = self.resolve(tool_name).map_or_else(
            || CheckResult::missing(tool_name.to_string()),
            |path| CheckResult::found(tool_name.to_string(), path),
        );
        tracing::debug!(
            "probe {tool_name}: {}",
            result
                .path
                .as_ref()
                .map_or_else(|| "not found".to_string(), |p| p.display().to_string())
        );
        Ok(result)
    }
}
