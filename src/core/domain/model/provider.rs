//! Domain model for infrastructure providers.
//!
//! A provider is a registered virtualization backend (a vSphere endpoint)
//! that clusters are placed on. Returned by `/v3/providers`.

use super::Named;
use serde::{Deserialize, Serialize};

/// A registered infrastructure provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InfraProvider {
    /// Provider UUID.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Backend type, e.g. `vsphere`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hostname or IP of the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    /// Account the control plane uses against the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
}

impl Named for InfraProvider {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
