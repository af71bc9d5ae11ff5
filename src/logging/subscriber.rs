//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

pub(super) const STAGE_TARGET: &str = "spinup::stage";
pub(super) const DRY_RUN_TARGET: &str = "spinup::dry_run";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends every event to the log file
/// with a timestamp and ANSI codes stripped.
///
/// Captures `DEBUG` and above regardless of the console verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` under the cache directory.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Truncate `path`, write a run header, and open it for appending.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let version = option_env!("SPINUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let header = format!(
            "==========================================\n\
             spinup {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (level, target) {
            (tracing::Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
            (tracing::Level::INFO, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG, _) => format!("[{ts}]     [debug] {msg}"),
            _ => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] for spinup's console output.
///
/// With `color` off every escape sequence is left out, including ones that
/// callers embedded in the message.
struct SpinupFormatter {
    color: bool,
}

impl SpinupFormatter {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}\x1b[0m")
        } else {
            strip_ansi(text)
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for SpinupFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = if self.color {
            extractor.message
        } else {
            strip_ansi(&extractor.message)
        };

        match level {
            tracing::Level::ERROR => writeln!(writer, "{} {msg}", self.paint("\x1b[31m", "ERROR")),
            tracing::Level::WARN => writeln!(writer, "{}  {msg}", self.paint("\x1b[33m", "WARN")),
            tracing::Level::INFO if target == STAGE_TARGET => writeln!(
                writer,
                "{} {}",
                self.paint("\x1b[1;34m", "==>"),
                self.paint("\x1b[1m", &msg)
            ),
            tracing::Level::INFO if target == DRY_RUN_TARGET => {
                writeln!(writer, "  {} {msg}", self.paint("\x1b[33m", "[DRY RUN]"))
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}", self.paint("\x1b[2m", &msg)),
        }
    }
}

/// Where console events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    /// `WARN` and above to stderr, everything else to stdout.
    Split,
    /// Every console event to stderr; stdout carries only command output.
    Stderr,
}

impl ConsoleTarget {
    fn make_writer(self) -> tracing_subscriber::fmt::writer::BoxMakeWriter {
        use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt as _};
        match self {
            Self::Split => BoxMakeWriter::new(
                std::io::stderr
                    .with_max_level(tracing::Level::WARN)
                    .and(std::io::stdout.with_min_level(tracing::Level::INFO)),
            ),
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console events go where `target` says. A file layer writes every event
/// (including `debug`) to `$XDG_CACHE_HOME/spinup/<command>.log`.
/// `RUST_LOG`, when set, overrides the console level. Must be called once at
/// program startup.
pub fn init_subscriber(verbose: bool, command: &str, color: bool, target: ConsoleTarget) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(SpinupFormatter { color })
        .with_writer(target.make_writer())
        .with_filter(console_filter);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_layer_writes_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("check.log");
        FileLayer::at(&path).expect("layer should open");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("=========="));
        assert!(contents.contains("spinup "));
    }

    #[test]
    fn file_layer_truncates_previous_run() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.log");
        fs::write(&path, "stale contents\n").unwrap();
        FileLayer::at(&path).expect("layer should open");
        assert!(!fs::read_to_string(&path).unwrap().contains("stale"));
    }

    #[test]
    fn file_layer_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(FileLayer::at(&tmp.path().join("absent").join("x.log")).is_none());
    }

    #[test]
    fn plain_formatter_strips_codes() {
        let f = SpinupFormatter { color: false };
        assert_eq!(f.paint("\x1b[31m", "\x1b[1mERROR\x1b[0m"), "ERROR");
        let f = SpinupFormatter { color: true };
        assert_eq!(f.paint("\x1b[31m", "ERROR"), "\x1b[31mERROR\x1b[0m");
    }
}
