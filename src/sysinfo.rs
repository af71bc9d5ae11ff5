//! Hardware and OS summary for the display step.
//!
//! Nothing here feeds the reconciliation; missing sources become `None`
//! rather than errors.
use std::path::Path;

use crate::platform::{Os, Platform};

/// Host summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Pretty OS name, or the OS family.
    pub os_name: String,
    /// Distro version.
    pub release: Option<String>,
    /// Kernel release.
    pub kernel: Option<String>,
    /// CPU architecture of this build.
    pub arch: String,
    /// CPU model name.
    pub cpu_model: Option<String>,
    /// Clock speed of the first CPU, in whole MHz.
    pub cpu_mhz: Option<u32>,
    /// Logical CPUs available to this process.
    pub cpu_cores: Option<usize>,
}

impl SystemInfo {
    /// Rows for the key/value table, skipping unknown values.
    #[must_use]
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![("Operating System".to_string(), self.os_name.clone())];
        let optional = [
            ("Release", self.release.clone()),
            ("Kernel", self.kernel.clone()),
            ("Processor", self.cpu_model.clone()),
            ("Speed", self.cpu_mhz.map(format_speed)),
            ("Cores", self.cpu_cores.map(|n| n.to_string())),
        ];
        rows.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key.to_string(), v))),
        );
        rows.push(("Architecture".to_string(), self.arch.clone()));
        rows
    }
}

/// `2893` MHz as `2.89 GHz`; below 1 GHz as `800 MHz`.
fn format_speed(mhz: u32) -> String {
    if mhz >= 1000 {
        format!("{}.{:02} GHz", mhz / 1000, (mhz % 1000) / 10)
    } else {
        format!("{mhz} MHz")
    }
}

/// Source of [`SystemInfo`].
pub trait SystemInfoProvider {
    /// Collect the summary. Never fails; unknown values are `None`.
    fn system_info(&self) -> SystemInfo;
}

/// Reads the running host.
#[derive(Debug, Clone)]
pub struct HostInfo<'a> {
    platform: &'a Platform,
}

impl<'a> HostInfo<'a> {
    /// Describe the host `platform` was detected on.
    #[must_use]
    pub const fn new(platform: &'a Platform) -> Self {
        Self { platform }
    }
}

impl SystemInfoProvider for HostInfo<'_> {
    fn system_info(&self) -> SystemInfo {
        let linux = self.platform.os == Os::Linux;
        let read = |path: &str| {
            if linux {
                std::fs::read_to_string(Path::new(path)).ok()
            } else {
                None
            }
        };
        let cpuinfo = read("/proc/cpuinfo");
        SystemInfo {
            os_name: self
                .platform
                .pretty_name
                .clone()
                .unwrap_or_else(|| self.platform.os.to_string()),
            release: self.platform.version_id.clone(),
            kernel: read("/proc/sys/kernel/osrelease")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            arch: std::env::consts::ARCH.to_string(),
            cpu_model: cpuinfo.as_deref().and_then(cpu_model),
            cpu_mhz: cpuinfo.as_deref().and_then(cpu_mhz),
            cpu_cores: std::thread::available_parallelism()
                .ok()
                .map(std::num::NonZeroUsize::get),
        }
    }
}

/// Extract the CPU model from `/proc/cpuinfo`.
///
/// x86 exposes `model name`; many ARM kernels only expose `Hardware` or
/// `Model`.
#[must_use]
pub fn cpu_model(cpuinfo: &str) -> Option<String> {
    ["model name", "Hardware", "Model"].iter().find_map(|wanted| {
        cpuinfo.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            let value = value.trim();
            (key.trim() == *wanted && !value.is_empty()).then(|| value.to_string())
        })
    })
}

/// Extract the clock speed from the first `cpu MHz` line of
/// `/proc/cpuinfo`, dropping the fraction. ARM kernels usually omit it.
#[must_use]
pub fn cpu_mhz(cpuinfo: &str) -> Option<u32> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim() != "cpu MHz" {
            return None;
        }
        value.trim().split('.').next()?.parse().ok()
    })
}
