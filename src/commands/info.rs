//! Command: banner and system summary.
use std::io::Write;

use anyhow::Result;

use super::{Context, Outcome};
use crate::metadata::Metadata;
use crate::render::{Style, render_banner, render_key_values, terminal_width};
use crate::sysinfo::{HostInfo, SystemInfo, SystemInfoProvider as _};

/// Banner followed by the system table.
#[must_use]
pub fn render(meta: &Metadata, info: &SystemInfo, width: usize, style: Style) -> String {
    format!(
        "{}\n{}",
        render_banner(meta, width, style),
        render_key_values(&info.rows(), style)
    )
}

/// Print the banner and system information.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run(ctx: &Context<'_>, out: &mut dyn Write) -> Result<Outcome> {
    let info = HostInfo::new(ctx.platform).system_info();
    write!(
        out,
        "{}",
        render(&Metadata::current(), &info, terminal_width(), ctx.style)
    )?;
    Ok(Outcome::Success)
}
