//! Helpers for the log file: location, ANSI stripping and timestamps.
use std::fs;
use std::path::{Path, PathBuf};

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range), so the clear-screen sequence is
/// stripped as well.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Base cache directory: `$XDG_CACHE_HOME`, else `~/.cache`.
fn cache_home() -> PathBuf {
    std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map_or_else(
            || {
                std::env::var_os("HOME")
                    .or_else(|| std::env::var_os("USERPROFILE"))
                    .map_or_else(|| PathBuf::from("."), PathBuf::from)
                    .join(".cache")
            },
            PathBuf::from,
        )
}

/// Return `<base>/spinup/`, creating it if needed.
fn spinup_dir_in(base: &Path) -> Option<PathBuf> {
    let dir = base.join("spinup");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path `$XDG_CACHE_HOME/spinup/<command>.log`.
///
/// `None` when the directory cannot be created; logging to file is then
/// skipped.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(spinup_dir_in(&cache_home())?.join(format!("{command}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
