use crate::{
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
    core::domain::{
        error::{CcpError, CcpResult},
        model::connection::CcpConnection,
        value_object::AuthToken,
    },
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{info, warn};

const LOGIN_PATH: &str = "v3/system/login";

pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    /// Exchanges the connection credentials for a session token.
    pub async fn execute(
        &self,
        http_client: &Client,
        connection: &CcpConnection,
    ) -> CcpResult<AuthToken> {
        let url = connection.url().endpoint(LOGIN_PATH);
        let request = LoginRequest {
            username: connection.username().as_str(),
            password: connection.password().as_str(),
        };

        let response = http_client
            .post(&url)
            .headers(self.default_headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| CcpError::Connection(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
                let token = LoginResponse::from_headers(response.headers())?.into_token()?;
                info!(user = connection.username().as_str(), "logged in to control plane");
                Ok(token)
            }
            StatusCode::UNAUTHORIZED => {
                warn!(user = connection.username().as_str(), "login rejected");
                Err(CcpError::Authentication(
                    "Invalid credentials provided".to_string(),
                ))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(%status, "unexpected login response");
                Err(CcpError::Authentication(format!(
                    "Login failed ({}): {}",
                    status.as_u16(),
                    body
                )))
            }
        }
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}
