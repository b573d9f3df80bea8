use crate::core::domain::error::ValidationError;
use std::time::{Duration, SystemTime};

/// Name of the header that carries the session token, both in the login
/// response and on every authenticated request.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// A control-plane session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    value: String,
    issued_at: SystemTime,
}

impl AuthToken {
    /// Creates a token issued right now, without validation.
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self {
            value,
            issued_at: SystemTime::now(),
        }
    }

    /// Restores a previously issued token, e.g. from the defaults file.
    pub fn restore(value: impl Into<String>, issued_at: SystemTime) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_token(&value)?;
        Ok(Self { value, issued_at })
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the time the token was obtained.
    #[must_use]
    pub fn issued_at(&self) -> SystemTime {
        self.issued_at
    }

    /// A token is stale once `lifetime` or more has elapsed since it was
    /// issued. An issue time in the future counts as stale.
    #[must_use]
    pub fn is_stale_at(&self, now: SystemTime, lifetime: Duration) -> bool {
        now.duration_since(self.issued_at)
            .map(|age| age >= lifetime)
            .unwrap_or(true)
    }

    /// Checks staleness against the current wall clock.
    #[must_use]
    pub fn is_stale(&self, lifetime: Duration) -> bool {
        self.is_stale_at(SystemTime::now(), lifetime)
    }
}

/// Validates a raw token string.
pub(crate) fn validate_token(token: &str) -> Result<(), ValidationError> {
    if token.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "token".to_string(),
            message: "Token cannot be empty".to_string(),
        });
    }
    Ok(())
}
