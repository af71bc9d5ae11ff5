//! Tool registry: the static list of tools to check and how to install them.
pub mod loader;
pub mod validation;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::Platform;

/// Registry shipped inside the binary.
pub const BUILTIN_TOOLS: &str = include_str!("../../conf/tools.toml");

/// A developer tool that should be present on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Display name; also the executable looked up on PATH unless
    /// `package` is set.
    pub name: String,
    /// Executable looked up on PATH when it differs from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Tools, declared earlier in the registry, that must be present first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Install commands in declared order; the first matching one is used.
    #[serde(default, rename = "install")]
    pub install_commands: Vec<PlatformCommand>,
}

impl Tool {
    /// The executable name probed on PATH.
    #[must_use]
    pub fn executable(&self) -> &str {
        self.package.as_deref().unwrap_or(&self.name)
    }

    /// Select the install command for `platform`: the first entry, in
    /// declared order, whose matcher applies.
    #[must_use]
    pub fn command_for(&self, platform: &Platform) -> Option<&PlatformCommand> {
        self.install_commands
            .iter()
            .find(|c| platform.matches(&c.platform_matcher))
    }
}

/// A shell command that installs a tool on matching platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCommand {
    /// Distro ID, OS name or `*`.
    #[serde(rename = "platform")]
    pub platform_matcher: String,
    /// Passed verbatim to the shell.
    #[serde(rename = "command")]
    pub command_line: String,
}

/// Where the registry is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The registry embedded in the binary.
    Builtin,
    /// A TOML file on disk.
    File(PathBuf),
    /// A TOML document served over HTTP(S).
    Url(String),
}

impl ConfigSource {
    /// Interpret a `--config` value: `http(s)://` is a URL, anything else a path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Resolve an optional `--config` value, defaulting to the built-in registry.
    #[must_use]
    pub fn from_arg(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or(Self::Builtin, Self::parse)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// The loaded, validated list of tools.
///
/// Order is the declared order and is preserved through reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    tools: Vec<Tool>,
}

/// On-disk shape: `[[tool]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryDocument {
    #[serde(default, rename = "tool")]
    tools: Vec<Tool>,
}

impl Registry {
    /// Build a registry from already-parsed tools, enforcing its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a name is empty or duplicated, or
    /// an install command has an empty platform or command line.
    pub fn new(tools: Vec<Tool>, origin: &str) -> Result<Self, ConfigError> {
        validation::check_invariants(&tools, origin)?;
        Ok(Self { tools })
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for invariant violations.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let doc: RegistryDocument = toml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.message().to_string(),
        })?;
        Self::new(doc.tools, origin)
    }

    /// The registry embedded in the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is broken.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_TOOLS, "built-in")
    }

    /// Load the registry from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or fetched, or its
    /// contents are invalid.
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        match source {
            ConfigSource::Builtin => Self::builtin(),
            ConfigSource::File(path) => {
                let content = loader::read_file(path)?;
                Self::from_toml_str(&content, &source.to_string())
            }
            ConfigSource::Url(url) => {
                let content = loader::fetch_url(url)?;
                Self::from_toml_str(&content, url)
            }
        }
    }

    /// Tools in declared order.
    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Number of registered tools.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
