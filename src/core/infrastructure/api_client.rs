//! Internal HTTP client that handles authentication and request execution.

use crate::{
    ClientConfig,
    auth::application::service::login_service::LoginService,
    core::domain::{
        error::{CcpError, CcpResult},
        model::connection::CcpConnection,
        value_object::{AUTH_TOKEN_HEADER, AuthToken},
    },
};
use reqwest::{Client, Method, StatusCode, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Statuses the control plane uses to signal success.
const SUCCESS_STATUSES: [StatusCode; 4] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
];

/// Internal HTTP client that manages the session token and provides methods
/// to call the control-plane API.
///
/// Every request carries the current token in the `X-Auth-Token` header. When
/// there is no token, or it has outlived the configured lifetime, a fresh
/// login happens before the request is sent. Failed requests are never
/// retried.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<CcpConnection>,
    auth: Arc<RwLock<Option<AuthToken>>>,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    /// Creates a new `ApiClient`. The client starts unauthenticated.
    ///
    /// # Errors
    /// Returns `CcpError::Connection` if the HTTP client cannot be built.
    pub fn new(connection: CcpConnection, config: ClientConfig) -> CcpResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accept_invalid_certs())
            .build()
            .map_err(|e| CcpError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            auth: Arc::new(RwLock::new(None)),
            config: Arc::new(config),
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &CcpConnection {
        &self.connection
    }

    /// Replaces the session token (after a login or when restoring a cached one).
    pub async fn set_auth(&self, token: AuthToken) {
        let mut lock = self.auth.write().await;
        *lock = Some(token);
    }

    /// Returns the current session token, if any.
    pub async fn auth(&self) -> Option<AuthToken> {
        self.auth.read().await.clone()
    }

    /// Returns `true` if there is a token that has not outlived its lifetime.
    pub async fn is_authenticated(&self) -> bool {
        let lock = self.auth.read().await;
        lock.as_ref()
            .is_some_and(|token| !token.is_stale(self.config.token_lifetime))
    }

    /// Logs in unconditionally and stores the new token.
    pub async fn login(&self) -> CcpResult<AuthToken> {
        let token = LoginService::new()
            .execute(&self.http_client, &self.connection)
            .await?;
        self.set_auth(token.clone()).await;
        Ok(token)
    }

    /// Logs in only when the token is absent or stale. Returns whether a
    /// login took place.
    pub async fn login_if_stale(&self) -> CcpResult<bool> {
        if self.is_authenticated().await {
            return Ok(false);
        }
        self.login().await?;
        Ok(true)
    }

    /// Performs an authenticated GET request and decodes the JSON response.
    pub async fn get<T>(&self, path: &str) -> CcpResult<T>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(Method::GET, path, None::<&()>).await?;
        decode(&body)
    }

    /// Performs an authenticated POST request with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> CcpResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::POST, path, Some(body)).await?;
        decode(&body)
    }

    /// Performs an authenticated PATCH request with a JSON body.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> CcpResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::PATCH, path, Some(body)).await?;
        decode(&body)
    }

    /// Performs an authenticated DELETE request. The response body, if any,
    /// is discarded.
    pub async fn delete(&self, path: &str) -> CcpResult<()> {
        self.execute(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Core request execution method. Ensures a session, sends the request
    /// and returns the raw response body on a success status.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> CcpResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        self.login_if_stale().await?;

        let url = self.connection.url().endpoint(path);
        let mut req_builder = self
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        {
            let auth_guard = self.auth.read().await;
            if let Some(token) = auth_guard.as_ref() {
                req_builder = req_builder.header(AUTH_TOKEN_HEADER, token.as_str());
            }
        }

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| CcpError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "control plane request");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CcpError::Connection(format!("Failed to read response: {}", e)))?;

        if !SUCCESS_STATUSES.contains(&status) {
            warn!(%method, %url, status = status.as_u16(), "request rejected");
            return Err(CcpError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> CcpResult<T> {
    serde_json::from_slice(body).map_err(|e| CcpError::Decode(e.to_string()))
}
