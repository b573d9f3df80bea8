//! Domain models for control-plane health reports.

use serde::{Deserialize, Serialize};

/// Minimal liveness report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LivenessHealth {
    /// Control-plane software version.
    #[serde(rename = "CXVersion", default, skip_serializing_if = "Option::is_none")]
    pub cx_version: Option<String>,
    /// Wall clock of the management host.
    #[serde(rename = "TimeOnMgmtHost", default, skip_serializing_if = "Option::is_none")]
    pub time_on_mgmt_host: Option<String>,
}

/// Detailed health of the control-plane nodes and pods.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Health {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_system_health: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_status: Option<Vec<NodeHealth>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_status_list: Option<Vec<PodHealth>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeHealth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PodHealth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}
