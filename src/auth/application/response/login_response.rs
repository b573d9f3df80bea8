use crate::core::domain::{
    error::{CcpError, CcpResult},
    value_object::{AUTH_TOKEN_HEADER, AuthToken, validate_token},
};
use reqwest::header::HeaderMap;

/// The part of a login response the client cares about: the session token
/// handed back in the `X-Auth-Token` header.
pub struct LoginResponse {
    pub token: String,
}

impl LoginResponse {
    pub fn from_headers(headers: &HeaderMap) -> CcpResult<Self> {
        let token = headers
            .get(AUTH_TOKEN_HEADER)
            .ok_or_else(|| {
                CcpError::Authentication(format!("Login response has no {AUTH_TOKEN_HEADER} header"))
            })?
            .to_str()
            .map_err(|e| CcpError::Authentication(format!("Unreadable session token: {e}")))?
            .to_string();

        Ok(Self { token })
    }

    /// Turns the response into a token issued now.
    pub fn into_token(self) -> CcpResult<AuthToken> {
        validate_token(&self.token)
            .map_err(|_| CcpError::Authentication("Server returned an empty session token".to_string()))?;
        Ok(AuthToken::new_unchecked(self.token))
    }
}
