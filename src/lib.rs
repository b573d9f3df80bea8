mod auth;
pub mod cli;
mod core;
mod resources;
#[cfg(test)]
mod tests;

pub use crate::core::domain::error::{CcpError, CcpResult, ValidationError};
pub use crate::core::domain::model::{
    Named,
    addon::{AddonCatalogue, AddonKind, AddonStatus, CatalogueEntry, InstalledAddon, InstalledAddons},
    cluster::{
        Cluster, DEFAULT_MASTER_POOL_NAME, DEFAULT_NETWORK_PLUGIN, DEFAULT_POD_CIDR,
        DEFAULT_WORKER_POOL_NAME, Infra, NetworkPlugin, NetworkPluginDetails, Node, NodePool,
        NodePoolScale, RegistriesSelfSigned, kubernetes_version_from_template,
    },
    connection::CcpConnection,
    defaults::Defaults,
    health::{Health, LivenessHealth, NodeHealth, PodHealth},
    provider::InfraProvider,
    subnet::NetworkSubnet,
};
pub use crate::core::domain::value_object::{
    AUTH_TOKEN_HEADER, AuthToken, CcpPassword, CcpUsername, ControlPlaneUrl,
};
pub use crate::core::infrastructure::defaults_store::{DEFAULTS_PATH_ENV, DefaultsStore};

use crate::core::{
    domain::value_object::{validate_password, validate_url, validate_username},
    infrastructure::api_client::ApiClient,
};
use std::time::Duration;

/// How long a session token is trusted before the client logs in again.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(180 * 60);

/// Client-side policy knobs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Age at which a session token is considered stale.
    pub token_lifetime: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }
}

/// A client for a Kubernetes cluster-provisioning control plane.
///
/// This client provides a typed interface for:
/// - Session management (login, lazy re-login once the token is stale)
/// - Tenant clusters (list, get, create, scale, delete)
/// - Infrastructure providers and network subnets
/// - Cluster add-ons
/// - Control-plane health
///
/// # Examples
///
/// ```no_run
/// use ccp_client::{CcpClient, CcpResult};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> CcpResult<()> {
///     let client = CcpClient::builder()
///         .url("https://10.10.0.5")
///         .credentials("admin", "password")
///         .build()
///         .await?;
///
///     client.login().await?;
///     for cluster in client.clusters().await? {
///         println!("{:?}", cluster.name);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct CcpClient {
    api_client: ApiClient,
}

/// Builder for CcpClient configuration
#[derive(Debug, Default)]
pub struct CcpClientBuilder {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    accept_invalid_certs: Option<bool>,
    token_lifetime: Option<Duration>,
    token: Option<AuthToken>,
}

impl CcpClientBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Whether to accept self-signed or otherwise invalid TLS certificates.
    /// Defaults to `true`.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    /// Starts the client with a previously obtained token instead of
    /// logging in on first use.
    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    pub async fn build(self) -> CcpResult<CcpClient> {
        let url = required("url", self.url)?;
        validate_url(&url)?;

        let username = required("username", self.username)?;
        validate_username(&username)?;

        let password = required("password", self.password)?;
        validate_password(&password)?;

        let connection = CcpConnection::new(
            ControlPlaneUrl::new_unchecked(url),
            CcpUsername::new_unchecked(username),
            CcpPassword::new_unchecked(password),
            self.accept_invalid_certs.unwrap_or(true),
        );
        let config = ClientConfig {
            token_lifetime: self.token_lifetime.unwrap_or(DEFAULT_TOKEN_LIFETIME),
        };

        let api_client = ApiClient::new(connection, config)?;
        if let Some(token) = self.token {
            api_client.set_auth(token).await;
        }

        Ok(CcpClient { api_client })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ValidationError::missing(field))
}

impl CcpClient {
    /// Creates a new builder for CcpClient configuration
    pub fn builder() -> CcpClientBuilder {
        CcpClientBuilder::default()
    }

    /// Authenticates against the control plane and stores the session token.
    ///
    /// # Errors
    ///
    /// - `CcpError::Authentication` if the credentials are rejected or the
    ///   server hands out no token
    /// - `CcpError::Connection` if the server is unreachable
    pub async fn login(&self) -> CcpResult<()> {
        self.api_client.login().await?;
        Ok(())
    }

    /// Logs in only when there is no token or it is stale. Returns `true`
    /// when a new token was obtained.
    pub async fn login_if_stale(&self) -> CcpResult<bool> {
        self.api_client.login_if_stale().await
    }

    /// Returns true if the client holds a token that is not stale.
    pub async fn is_authenticated(&self) -> bool {
        self.api_client.is_authenticated().await
    }

    /// Returns the current session token, if any.
    pub async fn auth_token(&self) -> Option<AuthToken> {
        self.api_client.auth().await
    }

    /// Returns the connection details the client was built with.
    pub fn connection(&self) -> &CcpConnection {
        self.api_client.connection()
    }
}
