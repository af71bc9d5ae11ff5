//! Reading registry documents from disk or over HTTP(S).
use std::path::Path;

use crate::error::ConfigError;

/// Read a registry file.
///
/// Unlike optional config files, a registry path given explicitly must exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Download a registry document.
///
/// Non-2xx responses are errors (ureq reports them as `StatusCode`).
///
/// # Errors
///
/// Returns [`ConfigError::Fetch`] on transport failures, error statuses or
/// an unreadable body.
pub fn fetch_url(url: &str) -> Result<String, ConfigError> {
    let fetch_error = |e: ureq::Error| ConfigError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    };
    let mut response = ureq::get(url).call().map_err(fetch_error)?;
    response.body_mut().read_to_string().map_err(fetch_error)
}
