//! Terminal rendering of reports, the system summary and the banner.
//!
//! Everything here is pure formatting: functions take data and return
//! strings, and never fail. Colour is applied only to glyphs and headers,
//! after column widths are measured on the uncoloured text.
use std::fmt::Write as _;

use crate::install::{PlannedAction, PlannedInstall};
use crate::metadata::Metadata;
use crate::platform::Platform;
use crate::reconcile::ReconciliationReport;

/// Glyph for an installed tool.
pub const CHECK: &str = "✓";
/// Glyph for a missing tool.
pub const CROSS: &str = "✗";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Widest banner rule, regardless of terminal width.
const BANNER_MAX_WIDTH: usize = 60;

/// Output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Emit ANSI colour codes.
    pub color: bool,
}

impl Style {
    /// Uncoloured output.
    pub const PLAIN: Self = Self { color: false };

    /// Coloured when stdout is a terminal and `no_color` is not set.
    #[must_use]
    pub fn detect(no_color: bool) -> Self {
        use std::io::IsTerminal as _;
        Self {
            color: !no_color
                && std::env::var_os("NO_COLOR").is_none()
                && std::io::stdout().is_terminal(),
        }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// A table cell: what is measured and what is printed.
#[derive(Debug, Clone, Default)]
struct Cell {
    plain: String,
    painted: String,
}

impl Cell {
    fn new(plain: String, painted: String) -> Self {
        Self { plain, painted }
    }

    fn text(text: &str) -> Self {
        Self::new(text.to_string(), text.to_string())
    }

    fn width(&self) -> usize {
        self.plain.chars().count()
    }
}

fn glyph_cell(glyph: &str, color: &str, name: &str, style: Style) -> Cell {
    Cell::new(
        format!("{glyph} {name}"),
        format!("{} {name}", style.paint(color, glyph)),
    )
}

/// One `✓ name` / `✗ name` line per tool, in registry order.
#[must_use]
pub fn render_status_list(report: &ReconciliationReport, style: Style) -> String {
    report
        .checks
        .iter()
        .map(|check| {
            let cell = if check.is_installed {
                glyph_cell(CHECK, GREEN, &check.tool_name, style)
            } else {
                glyph_cell(CROSS, RED, &check.tool_name, style)
            };
            format!("{}\n", cell.painted)
        })
        .collect()
}

/// Rows of the two-column status table, uncoloured.
///
/// The shorter column is padded with empty cells so every row has both
/// columns and the row count is `max(installed, missing)`.
#[must_use]
pub fn table_rows(report: &ReconciliationReport) -> Vec<(String, String)> {
    status_cells(report, Style::PLAIN)
        .into_iter()
        .map(|(left, right)| (left.plain, right.plain))
        .collect()
}

fn status_cells(report: &ReconciliationReport, style: Style) -> Vec<(Cell, Cell)> {
    let rows = report.installed.len().max(report.missing.len());
    (0..rows)
        .map(|i| {
            let left = report
                .installed
                .get(i)
                .map_or_else(Cell::default, |t| glyph_cell(CHECK, GREEN, &t.name, style));
            let right = report
                .missing
                .get(i)
                .map_or_else(Cell::default, |t| glyph_cell(CROSS, RED, &t.name, style));
            (left, right)
        })
        .collect()
}

/// Two-column `Installed` / `Missing` table.
#[must_use]
pub fn render_table(report: &ReconciliationReport, style: Style) -> String {
    let header = (
        Cell::new("Installed".to_string(), style.paint(GREEN, "Installed")),
        Cell::new("Missing".to_string(), style.paint(RED, "Missing")),
    );
    draw_table(Some(&header), &status_cells(report, style))
}

/// Key/value table, keys coloured.
#[must_use]
pub fn render_key_values(rows: &[(String, String)], style: Style) -> String {
    let cells: Vec<(Cell, Cell)> = rows
        .iter()
        .map(|(key, value)| {
            (
                Cell::new(key.clone(), style.paint(BLUE, key)),
                Cell::text(value),
            )
        })
        .collect();
    draw_table(None, &cells)
}

fn draw_table(header: Option<&(Cell, Cell)>, rows: &[(Cell, Cell)]) -> String {
    let widths = header
        .into_iter()
        .chain(rows)
        .fold((0, 0), |(l, r), (left, right)| {
            (l.max(left.width()), r.max(right.width()))
        });
    let border = format!("+{}+{}+\n", "-".repeat(widths.0 + 2), "-".repeat(widths.1 + 2));

    let mut out = border.clone();
    if let Some(header) = header {
        write_row(&mut out, widths, header);
        out.push_str(&border);
    }
    for row in rows {
        write_row(&mut out, widths, row);
    }
    out.push_str(&border);
    out
}

fn write_row(out: &mut String, widths: (usize, usize), (left, right): &(Cell, Cell)) {
    let _ = writeln!(
        out,
        "| {}{} | {}{} |",
        left.painted,
        " ".repeat(widths.0.saturating_sub(left.width())),
        right.painted,
        " ".repeat(widths.1.saturating_sub(right.width())),
    );
}

/// Program banner: name, version and authors between two rules.
#[must_use]
pub fn render_banner(meta: &Metadata, width: usize, style: Style) -> String {
    let rule = "=".repeat(width.clamp(1, BANNER_MAX_WIDTH));
    let mut out = format!("{}\n", style.paint(GREEN, &rule));
    let _ = writeln!(
        out,
        " {} {}",
        style.paint(BOLD, &meta.name),
        style.paint(GREEN, &meta.version)
    );
    if !meta.authors.is_empty() {
        let _ = writeln!(out, " by {}", style.paint(BOLD, &meta.authors.join(", ")));
    }
    let _ = writeln!(out, "{}", style.paint(GREEN, &rule));
    out
}

/// Install preview: one line per missing tool with the command that would
/// run, or why it would be skipped. Names are padded to a common width.
#[must_use]
pub fn render_plan(steps: &[PlannedInstall], platform: &Platform, style: Style) -> String {
    let mut out = format!(
        "{} {}\n",
        style.paint(BOLD, "Install plan for"),
        style.paint(BLUE, &platform.identifier())
    );
    if steps.is_empty() {
        let _ = writeln!(out, "  {} all tools are installed", style.paint(GREEN, CHECK));
        return out;
    }
    let width = steps
        .iter()
        .map(|s| s.tool_name.chars().count())
        .max()
        .unwrap_or(0);
    for step in steps {
        let pad = " ".repeat(width.saturating_sub(step.tool_name.chars().count()));
        let name = style.paint(BOLD, &step.tool_name);
        let _ = match &step.action {
            PlannedAction::Run(command) => writeln!(out, "  {name}{pad}  $ {command}"),
            PlannedAction::Skip(reason) => writeln!(
                out,
                "  {name}{pad}  {} {}",
                style.paint(RED, "skipped:"),
                reason.describe(platform)
            ),
        };
    }
    out
}

/// Escape sequence that clears the screen and scrollback and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[3J\x1b[H";

/// Terminal width in columns: the tty size, then `COLUMNS`, then 80.
#[must_use]
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| usize::from(w))
        .or_else(|| {
            std::env::var("COLUMNS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
        })
        .filter(|&n| n > 0)
        .unwrap_or(80)
}
