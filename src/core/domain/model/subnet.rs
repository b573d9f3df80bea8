//! Domain model for network subnets.

use super::Named;
use serde::{Deserialize, Serialize};

/// An IP allocation pool clusters draw node and VIP addresses from.
///
/// Returned by `/v3/network-service/subnets`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NetworkSubnet {
    /// Subnet UUID.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// CIDR block, e.g. `10.10.0.0/24`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<String>>,
}

impl Named for NetworkSubnet {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
