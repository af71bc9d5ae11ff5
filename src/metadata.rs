//! Build-time program metadata.

/// Program metadata shown in the banner.
///
/// Resolved at build time and handed to the renderer; nothing is discovered
/// from the filesystem at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Program name.
    pub name: String,
    /// Release version, or the `git describe` output of this build.
    pub version: String,
    /// Authors in declared order.
    pub authors: Vec<String>,
}

impl Metadata {
    /// Metadata of this build. `SPINUP_VERSION` (set by `build.rs` from
    /// `git describe` or the environment) wins over the Cargo version.
    #[must_use]
    pub fn current() -> Self {
        Self::new(
            env!("CARGO_PKG_NAME").trim_end_matches("-cli"),
            option_env!("SPINUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
            env!("CARGO_PKG_AUTHORS"),
        )
    }

    /// Build metadata from explicit values; `authors` is Cargo's
    /// colon-separated list.
    #[must_use]
    pub fn new(name: &str, version: &str, authors: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            authors: authors
                .split(':')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_has_name_and_version() {
        let meta = Metadata::current();
        assert_eq!(meta.name, "spinup");
        assert!(!meta.version.is_empty());
    }

    #[test]
    fn authors_split_on_colon() {
        let meta = Metadata::new("spinup", "1.0.0", "A <a@x.io>: B <b@x.io>");
        assert_eq!(meta.authors, vec!["A <a@x.io>", "B <b@x.io>"]);
    }

    #[test]
    fn empty_authors() {
        assert!(Metadata::new("spinup", "1.0.0", "").authors.is_empty());
    }
}
