//! Core logging types: install entries, status, and the [`Log`] trait.

/// Per-tool install result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEntry {
    /// Tool name.
    pub tool: String,
    /// Final status of the install attempt.
    pub status: InstallStatus,
    /// Optional detail message (e.g., skip reason or exit code).
    pub message: Option<String>,
}

/// Status of one tool after the installer has processed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// The install command exited zero.
    Installed,
    /// No install command applied; nothing was run.
    Skipped,
    /// Dry-run mode; the command was only printed.
    DryRun,
    /// The install command failed or could not be launched.
    Failed,
}

/// Abstraction over logging backends.
///
/// The installer and commands log through this trait so tests can swap in an
/// isolated [`Logger`](super::logger::Logger).
pub trait Log {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a per-tool install result for the summary.
    fn record_install(&self, tool: &str, status: InstallStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_status_equality() {
        assert_eq!(InstallStatus::Installed, InstallStatus::Installed);
        assert_ne!(InstallStatus::Installed, InstallStatus::Failed);
        assert_ne!(InstallStatus::Skipped, InstallStatus::DryRun);
    }

    #[test]
    fn install_entry_clone() {
        let entry = InstallEntry {
            tool: "git".to_string(),
            status: InstallStatus::Failed,
            message: Some("exit 1".to_string()),
        };
        assert_eq!(entry.clone(), entry);
    }
}
