//! Host platform detection and matching of registry platform names.
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Locations of the os-release file, in lookup order.
const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// Matcher that applies to every host.
pub const ANY_PLATFORM: &str = "*";

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-likes.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current host.
///
/// The distro fields come from os-release and are only populated on Linux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// os-release `ID` (e.g. `fedora`).
    pub distro: Option<String>,
    /// os-release `ID_LIKE`, split on whitespace.
    pub distro_like: Vec<String>,
    /// os-release `VERSION_ID`.
    pub version_id: Option<String>,
    /// os-release `PRETTY_NAME`.
    pub pretty_name: Option<String>,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        let os = Self::detect_os();
        if os != Os::Linux {
            return Self::new(os);
        }
        OS_RELEASE_PATHS
            .iter()
            .find_map(|p| std::fs::read_to_string(Path::new(p)).ok())
            .map_or_else(|| Self::new(os), |content| Self::from_os_release(os, &content))
    }

    /// A platform with no distro information.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self {
            os,
            distro: None,
            distro_like: Vec::new(),
            version_id: None,
            pretty_name: None,
        }
    }

    /// Build a platform from the contents of an os-release file.
    #[must_use]
    pub fn from_os_release(os: Os, content: &str) -> Self {
        let fields = parse_os_release(content);
        let lower = |key: &str| {
            fields
                .get(key)
                .filter(|v| !v.is_empty())
                .map(|v| v.to_lowercase())
        };
        Self {
            os,
            distro: lower("ID"),
            distro_like: lower("ID_LIKE")
                .map(|v| v.split_whitespace().map(String::from).collect())
                .unwrap_or_default(),
            version_id: fields.get("VERSION_ID").cloned(),
            pretty_name: fields.get("PRETTY_NAME").cloned(),
        }
    }

    /// Replace the detected distro with an explicit identifier.
    ///
    /// Used by `--platform`; `ID_LIKE` is cleared so only the given
    /// identifier (and the OS name) match.
    #[must_use]
    pub fn with_identifier(mut self, id: &str) -> Self {
        self.distro = Some(id.trim().to_lowercase());
        self.distro_like.clear();
        self
    }

    /// Short identifier for messages: the distro ID, or the OS name.
    #[must_use]
    pub fn identifier(&self) -> String {
        self.distro
            .clone()
            .unwrap_or_else(|| self.os.to_string())
    }

    /// Whether a platform matcher from the tool registry applies to this host.
    ///
    /// `*` matches everything; anything else is compared case-insensitively
    /// against the OS name, the distro ID and each `ID_LIKE` entry.
    #[must_use]
    pub fn matches(&self, matcher: &str) -> bool {
        let matcher = matcher.trim();
        if matcher == ANY_PLATFORM {
            return true;
        }
        let matcher = matcher.to_lowercase();
        matcher == self.os.to_string()
            || self.distro.as_deref() == Some(matcher.as_str())
            || self.distro_like.iter().any(|like| *like == matcher)
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            // Other Unix-likes are treated as Linux
            Os::Linux
        }
    }
}

/// Parse `KEY=value` lines of an os-release file.
///
/// Comments and blank lines are skipped; single or double quotes around a
/// value are removed.
#[must_use]
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
