use crate::core::domain::error::ValidationError;

const ALLOWED_SCHEMES: [&str; 2] = ["https", "http"];
const MAX_URL_LENGTH: usize = 2083;

/// The validated base URL of a control plane, e.g. `https://10.100.10.10`.
///
/// Stored without a trailing slash so that API paths (which always start
/// with `/`) can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPlaneUrl(String);

impl ControlPlaneUrl {
    /// Creates a new URL without validation.
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url.trim_end_matches('/').to_string())
    }

    /// Validates and wraps a base URL.
    pub fn parse(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        validate_url(&url)?;
        Ok(Self::new_unchecked(url))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an API path such as `/v3/clusters` onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

/// Validates a control-plane base URL.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::Format("URL must contain a host".to_string()));
    }
    Ok(())
}
