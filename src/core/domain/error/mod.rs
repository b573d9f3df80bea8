use thiserror::Error;

/// The main error type for control-plane operations.
///
/// Every client operation surfaces one of these variants as-is. Nothing is
/// retried: the caller decides what to do next.
#[derive(Error, Debug)]
pub enum CcpError {
    /// A transport-level failure (DNS, TLS, connection refused, ...)
    ///
    /// # Fields
    /// * `0` - A description of what went wrong while talking to the server
    #[error("Connection error: {0}")]
    Connection(String),

    /// Login was rejected, or the server did not hand out a session token
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A required field was missing or malformed. Raised before any request
    /// is sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a status outside the accepted success codes
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `body` - The raw response body, kept for context
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// No record matched the requested identifier or name
    ///
    /// # Fields
    /// * `resource` - The kind of record looked up (cluster, provider, ...)
    /// * `key` - The identifier or name that did not resolve
    #[error("Cannot find {resource} {key}")]
    NotFound { resource: String, key: String },

    /// A response body could not be unmarshaled into the expected record
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing the local defaults file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The local defaults file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CcpError {
    pub(crate) fn not_found(resource: &str, key: impl Into<String>) -> Self {
        CcpError::NotFound {
            resource: resource.to_string(),
            key: key.into(),
        }
    }

    /// Returns the HTTP status carried by an `Api` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CcpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    /// A required field that is absent or empty.
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.into(),
            message: "is required".to_string(),
        }
    }

    /// The offending field name, for `Field` errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Field { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Type alias for Results that may fail with a CcpError
pub type CcpResult<T> = Result<T, CcpError>;
