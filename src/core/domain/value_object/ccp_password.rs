use crate::core::domain::error::ValidationError;
use std::fmt;

/// A control-plane password (plaintext, held only for the login call).
#[derive(Clone, PartialEq, Eq)]
pub struct CcpPassword(String);

impl CcpPassword {
    /// Creates a new password without validation.
    pub(crate) fn new_unchecked(password: String) -> Self {
        Self(password)
    }

    /// Validates and wraps a password.
    pub fn parse(password: impl Into<String>) -> Result<Self, ValidationError> {
        let password = password.into();
        validate_password(&password)?;
        Ok(Self(password))
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CcpPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CcpPassword(****)")
    }
}

/// Validates a password.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    if password.len() > 256 {
        return Err(ValidationError::Format(
            "Password cannot exceed 256 characters".to_string(),
        ));
    }
    Ok(())
}
