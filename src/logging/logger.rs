//! Structured logger with dry-run awareness and install summary collection.
use std::cell::RefCell;
use std::path::PathBuf;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{InstallEntry, InstallStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Every message is also written to `$XDG_CACHE_HOME/spinup/<command>.log`
/// by the file layer installed in
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug, Default)]
pub struct Logger {
    entries: RefCell<Vec<InstallEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// opened by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a copy of all recorded install entries.
    #[must_use]
    pub fn entries(&self) -> Vec<InstallEntry> {
        self.entries.borrow().clone()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record an install result for the summary.
    pub fn record_install(&self, tool: &str, status: InstallStatus, message: Option<&str>) {
        self.entries.borrow_mut().push(InstallEntry {
            tool: tool.to_string(),
            status,
            message: message.map(String::from),
        });
    }

    /// Print the summary of the installs recorded since the last summary,
    /// then forget them. Prints nothing when no install was attempted.
    pub fn print_summary(&self) {
        let entries = self.entries.take();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut installed = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                InstallStatus::Installed => {
                    installed += 1;
                    ("✓", "\x1b[32m")
                }
                InstallStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                InstallStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                InstallStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.tool));
        }

        let total = installed + skipped + dry_run + failed;
        self.info(&format!(
            "{total} tools: \x1b[32m{installed} installed\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_install(&self, tool: &str, status: InstallStatus, message: Option<&str>) {
        self.record_install(tool, status, message);
    }
}
