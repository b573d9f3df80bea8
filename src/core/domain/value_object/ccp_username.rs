use crate::core::domain::error::ValidationError;

/// A control-plane login name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcpUsername(String);

impl CcpUsername {
    /// Creates a new username without validation.
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Validates and wraps a username.
    pub fn parse(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.len() > 128 {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed 128 characters (got {})",
            username.len()
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::Format(
            "Username cannot contain whitespace".to_string(),
        ));
    }
    Ok(())
}
