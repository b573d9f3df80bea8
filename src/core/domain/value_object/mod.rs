mod auth_token;
mod ccp_password;
mod ccp_username;
mod control_plane_url;
pub(crate) mod serde_helpers;

pub use auth_token::{AUTH_TOKEN_HEADER, AuthToken};
pub use ccp_password::CcpPassword;
pub use ccp_username::CcpUsername;
pub use control_plane_url::ControlPlaneUrl;

// Re-export validation functions for internal use
pub(crate) use auth_token::validate_token;
pub(crate) use ccp_password::validate_password;
pub(crate) use ccp_username::validate_username;
pub(crate) use control_plane_url::validate_url;
