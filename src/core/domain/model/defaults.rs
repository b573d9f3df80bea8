//! Locally persisted CLI state.
//!
//! The field names and the RFC 3339 token time are the ones existing
//! `~/.ccpctl.json` files already use, so older files load unchanged.

use crate::core::domain::value_object::{AuthToken, serde_helpers::optional_system_time};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Default values applied to CLI commands when a parameter is omitted,
/// plus the cached session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Friendly name of the control plane.
    #[serde(rename = "cpnamedfl", default, skip_serializing_if = "Option::is_none")]
    pub cp_name: Option<String>,
    #[serde(rename = "sshuser", default, skip_serializing_if = "Option::is_none")]
    pub ssh_user: Option<String>,
    #[serde(rename = "sshkey", default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    #[serde(rename = "cpuser", default, skip_serializing_if = "Option::is_none")]
    pub cp_user: Option<String>,
    #[serde(rename = "cppass", default, skip_serializing_if = "Option::is_none")]
    pub cp_pass: Option<String>,
    #[serde(rename = "cpurl", default, skip_serializing_if = "Option::is_none")]
    pub cp_url: Option<String>,
    #[serde(rename = "cpclusterdfl", default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(rename = "cptoken", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        rename = "cptokentime",
        default,
        with = "optional_system_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub token_time: Option<SystemTime>,
    #[serde(rename = "cpdatastoredfl", default, skip_serializing_if = "Option::is_none")]
    pub datastore: Option<String>,
    #[serde(rename = "cpdatacenterdfl", default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(rename = "cpimagedfl", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "cpnetworkdfl", default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(rename = "cpproviderdfl", default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(rename = "cpproviderdflUUID", default, skip_serializing_if = "Option::is_none")]
    pub provider_uuid: Option<String>,
    #[serde(
        rename = "cpsubnetdfl",
        alias = "CPSubnetDfl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subnet: Option<String>,
    #[serde(rename = "cpsubnetdflUUID", default, skip_serializing_if = "Option::is_none")]
    pub subnet_uuid: Option<String>,
    #[serde(rename = "cpvsclusterdfl", default, skip_serializing_if = "Option::is_none")]
    pub vs_cluster: Option<String>,
}

impl Defaults {
    /// Rebuilds the cached session token, if both value and issue time are
    /// present and usable.
    pub fn session_token(&self) -> Option<AuthToken> {
        let value = self.token.as_deref()?;
        let issued_at = self.token_time?;
        AuthToken::restore(value, issued_at).ok()
    }

    /// Caches a freshly issued token.
    pub fn store_session_token(&mut self, token: &AuthToken) {
        self.token = Some(token.as_str().to_string());
        self.token_time = Some(token.issued_at());
    }

    /// True when there is no cached token or it is `lifetime` old or more.
    pub fn needs_login(&self, lifetime: Duration) -> bool {
        self.session_token()
            .is_none_or(|token| token.is_stale(lifetime))
    }
}
