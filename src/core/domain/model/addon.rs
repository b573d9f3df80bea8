//! Domain models for cluster add-ons.
//!
//! The control plane exposes, per cluster, a catalogue of installable
//! add-ons (`/v3/clusters/{id}/catalog`) and the list of add-ons already
//! installed (`/v3/clusters/{id}/addons`).

use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The catalogue of installable add-ons, keyed by catalogue name
/// (e.g. `ccp-monitor`).
pub type AddonCatalogue = BTreeMap<String, CatalogueEntry>;

/// One installable add-on. Posting an entry back to the add-ons endpoint
/// installs it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogueEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Chart location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// The installed add-ons of a cluster.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstalledAddons {
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<InstalledAddon>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstalledAddon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(rename = "addon_status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AddonStatus>,
}

/// Installation state of an add-on and of its underlying Helm release.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AddonStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm_status: Option<String>,
}

/// The well-known add-ons, addressable by a short alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddonKind {
    Dashboard,
    Kubeflow,
    Harbor,
    Logging,
    Monitoring,
    Istio,
    HxCsi,
}

impl AddonKind {
    pub const ALL: [AddonKind; 7] = [
        AddonKind::Dashboard,
        AddonKind::Kubeflow,
        AddonKind::Harbor,
        AddonKind::Logging,
        AddonKind::Monitoring,
        AddonKind::Istio,
        AddonKind::HxCsi,
    ];

    /// The short name used on the command line.
    pub fn alias(self) -> &'static str {
        match self {
            AddonKind::Dashboard => "dashboard",
            AddonKind::Kubeflow => "kubeflow",
            AddonKind::Harbor => "harbor",
            AddonKind::Logging => "logging",
            AddonKind::Monitoring => "monitoring",
            AddonKind::Istio => "istio",
            AddonKind::HxCsi => "hx-csi",
        }
    }

    /// The key of this add-on in the cluster catalogue.
    pub fn catalogue_key(self) -> &'static str {
        match self {
            AddonKind::Dashboard => "kubernetes-dashboard",
            AddonKind::Kubeflow => "ccp-kubeflow",
            AddonKind::Harbor => "ccp-harbor-operator",
            AddonKind::Logging => "ccp-efk",
            AddonKind::Monitoring => "ccp-monitor",
            AddonKind::Istio => "ccp-istio-operator",
            AddonKind::HxCsi => "ccp-hxcsi",
        }
    }

    /// Looks this add-on up in a catalogue.
    pub fn entry(self, catalogue: &AddonCatalogue) -> Option<&CatalogueEntry> {
        catalogue.get(self.catalogue_key())
    }
}

impl fmt::Display for AddonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

impl FromStr for AddonKind {
    type Err = ValidationError;

    /// Accepts either the short alias or the catalogue key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        AddonKind::ALL
            .into_iter()
            .find(|kind| kind.alias() == s || kind.catalogue_key() == s)
            .ok_or_else(|| {
                ValidationError::ConstraintViolation(format!(
                    "Unknown add-on '{}'. Must be one of: {}",
                    s,
                    AddonKind::ALL.map(AddonKind::alias).join(", ")
                ))
            })
    }
}
