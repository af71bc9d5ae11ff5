//! Partition the registry into installed and missing tools.
use serde::Serialize;

use crate::config::Tool;
use crate::error::ProbeError;
use crate::probe::{CheckResult, Probe};

/// Installed/missing split of the registry.
///
/// Both partitions keep registry order, are disjoint, and together contain
/// every registered tool exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Tools found on the host.
    pub installed: Vec<Tool>,
    /// Tools not found on the host.
    pub missing: Vec<Tool>,
    /// One result per registered tool, in registry order.
    pub checks: Vec<CheckResult>,
}

impl ReconciliationReport {
    /// Number of tools that were checked.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.checks.len()
    }

    /// Whether nothing is missing.
    #[must_use]
    pub const fn all_installed(&self) -> bool {
        self.missing.is_empty()
    }

    /// Machine-readable view used by `check --json`.
    #[must_use]
    pub fn to_status(&self) -> StatusDocument<'_> {
        StatusDocument {
            installed: self.installed.iter().map(|t| t.name.as_str()).collect(),
            missing: self.missing.iter().map(|t| t.name.as_str()).collect(),
            tools: &self.checks,
        }
    }
}

/// JSON shape of a reconciliation report.
#[derive(Debug, Serialize)]
pub struct StatusDocument<'a> {
    /// Names of the installed tools.
    pub installed: Vec<&'a str>,
    /// Names of the missing tools.
    pub missing: Vec<&'a str>,
    /// Per-tool probe results.
    pub tools: &'a [CheckResult],
}

/// Probe every tool once, in registry order, and partition the results.
///
/// Each tool is probed by [`Tool::executable`] and reported under its
/// display name.
///
/// # Errors
///
/// Propagates the first [`ProbeError`]; a tool that is merely absent is not
/// an error.
pub fn reconcile(registry: &[Tool], probe: &dyn Probe) -> Result<ReconciliationReport, ProbeError> {
    let mut report = ReconciliationReport::default();
    for tool in registry {
        let mut result = probe.probe(tool.executable())?;
        result.tool_name.clone_from(&tool.name);
        if result.is_installed {
            report.installed.push(tool.clone());
        } else {
            report.missing.push(tool.clone());
        }
        report.checks.push(result);
    }
    tracing::debug!(
        "{} installed, {} missing",
        report.installed.len(),
        report.missing.len()
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::tool;
    use crate::probe::MockProbe;
    use mockall::predicate::eq;
    use std::collections::HashSet;
    use std::path::PathBuf;

    /// A probe that reports exactly `present` as installed.
    fn probe_with(present: &'static [&'static str]) -> MockProbe {
        let mut probe = MockProbe::new();
        probe.expect_probe().returning(move |name| {
            Ok(if present.contains(&name) {
                CheckResult::found(name.to_string(), PathBuf::from("/usr/bin").join(name))
            } else {
                CheckResult::missing(name.to_string())
            })
        });
        probe
    }

    fn names(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn empty_registry_gives_empty_report() {
        let mut probe = MockProbe::new();
        probe.expect_probe().never();
        let report = reconcile(&[], &probe).unwrap();
        assert!(report.installed.is_empty());
        assert!(report.missing.is_empty());
        assert_eq!(report.total(), 0);
        assert!(report.all_installed());
    }

    #[test]
    fn partitions_in_registry_order() {
        let registry = vec![
            tool("git", &[]),
            tool("node", &[]),
            tool("npm", &[]),
            tool("docker", &[]),
        ];
        let report = reconcile(&registry, &probe_with(&["npm", "git"])).unwrap();
        assert_eq!(names(&report.installed), vec!["git", "npm"]);
        assert_eq!(names(&report.missing), vec!["node", "docker"]);
        let checked: Vec<&str> = report.checks.iter().map(|c| c.tool_name.as_str()).collect();
        assert_eq!(checked, vec!["git", "node", "npm", "docker"]);
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let registry = vec![
            tool("a", &[]),
            tool("b", &[]),
            tool("c", &[]),
            tool("d", &[]),
            tool("e", &[]),
        ];
        let report = reconcile(&registry, &probe_with(&["b", "e"])).unwrap();

        let installed: HashSet<&str> = names(&report.installed).into_iter().collect();
        let missing: HashSet<&str> = names(&report.missing).into_iter().collect();
        assert!(installed.is_disjoint(&missing));

        let mut union: Vec<&str> = installed.union(&missing).copied().collect();
        union.sort_unstable();
        let mut expected = names(&registry);
        expected.sort_unstable();
        assert_eq!(union, expected);
        assert_eq!(report.installed.len() + report.missing.len(), registry.len());
    }

    #[test]
    fn probes_each_tool_exactly_once() {
        let mut probe = MockProbe::new();
        for name in ["git", "docker"] {
            probe
                .expect_probe()
                .with(eq(name))
                .times(1)
                .returning(|n| Ok(CheckResult::missing(n.to_string())));
        }
        let registry = vec![tool("git", &[]), tool("docker", &[])];
        let report = reconcile(&registry, &probe).unwrap();
        assert_eq!(report.missing.len(), 2);
    }

    #[test]
    fn package_name_is_probed() {
        let mut rg = tool("ripgrep", &[]);
        rg.package = Some("rg".to_string());
        let report = reconcile(&[rg], &probe_with(&["rg"])).unwrap();
        assert_eq!(names(&report.installed), vec!["ripgrep"]);
        assert_eq!(report.checks[0].tool_name, "ripgrep");
        assert_eq!(report.checks[0].path, Some(PathBuf::from("/usr/bin/rg")));
    }

    #[test]
    fn probe_error_aborts() {
        let mut probe = MockProbe::new();
        probe
            .expect_probe()
            .returning(|_| Err(ProbeError::SearchPathUnavailable));
        let err = reconcile(&[tool("git", &[])], &probe).unwrap_err();
        assert!(matches!(err, ProbeError::SearchPathUnavailable));
    }

    #[test]
    fn status_document_serializes() {
        let registry = vec![tool("git", &[]), tool("docker", &[])];
        let report = reconcile(&registry, &probe_with(&["git"])).unwrap();
        let json = serde_json::to_value(report.to_status()).unwrap();
        assert_eq!(json["installed"], serde_json::json!(["git"]));
        assert_eq!(json["missing"], serde_json::json!(["docker"]));
        assert_eq!(json["tools"][0]["name"], "git");
        assert_eq!(json["tools"][0]["installed"], true);
        assert_eq!(json["tools"][1]["path"], serde_json::Value::Null);
    }
}
