//! Registry checks: hard invariants that reject a document, and soft
//! warnings about tools this host cannot install.
use std::collections::HashSet;

use super::Tool;
use crate::error::ConfigError;
use crate::platform::Platform;

/// A non-fatal problem found in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Tool the warning is about.
    pub tool: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `tool`.
    #[must_use]
    pub fn new(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Enforce the registry invariants.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] on the first violation:
///
/// - an empty, padded or duplicated tool name or `package`;
/// - a dependency that is the tool itself or is not declared before it;
/// - an empty platform matcher or command line.
pub fn check_invariants(tools: &[Tool], origin: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::Invalid {
        origin: origin.to_string(),
        message,
    };

    let mut seen = HashSet::new();
    for (index, tool) in tools.iter().enumerate() {
        let name = tool.name.trim();
        if name.is_empty() {
            return Err(invalid(format!("tool #{} has an empty name", index + 1)));
        }
        if name != tool.name {
            return Err(invalid(format!(
                "tool name '{}' has surrounding whitespace",
                tool.name
            )));
        }
        if let Some(package) = &tool.package
            && (package.trim().is_empty() || package.trim() != package)
        {
            return Err(invalid(format!("package for '{name}' is empty or padded")));
        }
        for dependency in &tool.dependencies {
            if dependency == name {
                return Err(invalid(format!("'{name}' depends on itself")));
            }
            if !seen.contains(dependency.as_str()) {
                return Err(invalid(format!(
                    "'{name}' depends on '{dependency}', which is not declared before it"
                )));
            }
        }
        if !seen.insert(name) {
            return Err(invalid(format!("duplicate tool name '{name}'")));
        }
        for command in &tool.install_commands {
            if command.platform_matcher.trim().is_empty() {
                return Err(invalid(format!(
                    "install command for '{name}' has an empty platform"
                )));
            }
            if command.command_line.trim().is_empty() {
                return Err(invalid(format!(
                    "install command for '{name}' on '{}' is empty",
                    command.platform_matcher
                )));
            }
        }
    }
    Ok(())
}

/// Collect warnings for tools that can never be installed on `platform`.
#[must_use]
pub fn warnings(tools: &[Tool], platform: &Platform) -> Vec<ValidationWarning> {
    tools
        .iter()
        .filter_map(|tool| {
            if tool.install_commands.is_empty() {
                Some(ValidationWarning::new(
                    &tool.name,
                    "no install command declared",
                ))
            } else if tool.command_for(platform).is_none() {
                Some(ValidationWarning::new(
                    &tool.name,
                    format!("no install command for platform {}", platform.identifier()),
                ))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::test_helpers::{dependent, tool};
    use crate::platform::Os;

    fn message(err: ConfigError) -> String {
        match err {
            ConfigError::Invalid { message, .. } => message,
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn valid_registry_passes() {
        let tools = vec![
            tool("git", &[("fedora", "sudo dnf install -y git")]),
            tool("npm", &[]),
        ];
        assert!(check_invariants(&tools, "test").is_ok());
    }

    #[test]
    fn empty_registry_passes() {
        assert!(check_invariants(&[], "test").is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let err = check_invariants(&[tool("  ", &[])], "test").unwrap_err();
        assert_eq!(message(err), "tool #1 has an empty name");
    }

    #[test]
    fn padded_name_rejected() {
        let err = check_invariants(&[tool(" git", &[])], "test").unwrap_err();
        assert!(message(err).contains("whitespace"));
    }

    #[test]
    fn duplicate_name_rejected() {
        let tools = vec![tool("git", &[]), tool("node", &[]), tool("git", &[])];
        let err = check_invariants(&tools, "test").unwrap_err();
        assert_eq!(message(err), "duplicate tool name 'git'");
    }

    #[test]
    fn empty_command_line_rejected() {
        let err = check_invariants(&[tool("git", &[("fedora", "   ")])], "test").unwrap_err();
        assert_eq!(
            message(err),
            "install command for 'git' on 'fedora' is empty"
        );
    }

    #[test]
    fn empty_platform_rejected() {
        let err = check_invariants(&[tool("git", &[("", "dnf install git")])], "test").unwrap_err();
        assert!(message(err).contains("empty platform"));
    }

    #[test]
    fn dependency_declared_earlier_passes() {
        let tools = vec![tool("node", &[]), dependent("npm", &["node"], &[])];
        assert!(check_invariants(&tools, "test").is_ok());
    }

    #[test]
    fn forward_dependency_rejected() {
        let tools = vec![dependent("npm", &["node"], &[]), tool("node", &[])];
        let err = check_invariants(&tools, "test").unwrap_err();
        assert_eq!(
            message(err),
            "'npm' depends on 'node', which is not declared before it"
        );
    }

    #[test]
    fn self_dependency_rejected() {
        let err = check_invariants(&[dependent("npm", &["npm"], &[])], "test").unwrap_err();
        assert_eq!(message(err), "'npm' depends on itself");
    }

    #[test]
    fn blank_package_rejected() {
        let mut rg = tool("ripgrep", &[]);
        rg.package = Some(" ".to_string());
        let err = check_invariants(&[rg], "test").unwrap_err();
        assert!(message(err).contains("package for 'ripgrep'"));
    }

    #[test]
    fn error_carries_origin() {
        let err = check_invariants(&[tool("", &[])], "https://example.com/tools.toml").unwrap_err();
        assert!(err.to_string().contains("https://example.com/tools.toml"));
    }

    #[test]
    fn warnings_for_uninstallable_tools() {
        let platform = Platform::new(Os::Linux).with_identifier("debian");
        let tools = vec![
            tool("git", &[("*", "install git")]),
            tool("docker", &[("fedora", "sudo dnf install -y moby-engine")]),
            tool("vim", &[]),
        ];
        let found = warnings(&tools, &platform);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].tool, "docker");
        assert_eq!(found[0].message, "no install command for platform debian");
        assert_eq!(found[1].tool, "vim");
        assert_eq!(found[1].message, "no install command declared");
    }
}
