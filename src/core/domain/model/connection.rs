use crate::core::domain::value_object::{CcpPassword, CcpUsername, ControlPlaneUrl};

/// Where and as whom the client talks to the control plane.
#[derive(Debug, Clone)]
pub struct CcpConnection {
    url: ControlPlaneUrl,
    username: CcpUsername,
    password: CcpPassword,
    accept_invalid_certs: bool,
}

impl CcpConnection {
    pub fn new(
        url: ControlPlaneUrl,
        username: CcpUsername,
        password: CcpPassword,
        accept_invalid_certs: bool,
    ) -> Self {
        Self {
            url,
            username,
            password,
            accept_invalid_certs,
        }
    }

    pub fn url(&self) -> &ControlPlaneUrl {
        &self.url
    }

    pub fn username(&self) -> &CcpUsername {
        &self.username
    }

    pub fn password(&self) -> &CcpPassword {
        &self.password
    }

    /// Control planes usually ship self-signed certificates, so certificate
    /// verification is relaxed unless the caller opts back in.
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}
