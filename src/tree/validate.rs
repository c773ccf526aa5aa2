//! Domain validators shared by every create/rename/update entry point.

use crate::error::ValidationError;

/// URL prefixes accepted for repository entries.
pub const ALLOWED_URL_PREFIXES: [&str; 2] = ["https://github.com/", "https://gitlab.com/"];

/// Validate a folder or repository name, returning the trimmed value.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Validate a repository URL, returning the trimmed value.
///
/// Only the host prefix is checked; the rest of the URL is taken as-is.
pub fn validate_repo_url(url: &str) -> Result<String, ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    if !ALLOWED_URL_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return Err(ValidationError::BadScheme);
    }
    Ok(trimmed.to_string())
}
