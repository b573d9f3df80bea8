//! Domain models for tenant clusters.
//!
//! These records mirror the `/v3/clusters` resources. Every field is optional
//! and omitted from the request body when unset, so a partially filled
//! `Cluster` marshals to exactly the attributes the caller provided.

use super::Named;
use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Network plugin applied when the caller does not pick one.
pub const DEFAULT_NETWORK_PLUGIN: &str = "calico";
/// Pod CIDR applied when the caller does not pick one.
pub const DEFAULT_POD_CIDR: &str = "192.168.0.0/16";
/// Name given to the master pool when the caller does not pick one.
pub const DEFAULT_MASTER_POOL_NAME: &str = "master-group";
/// Name given to worker pools when the caller does not pick one.
pub const DEFAULT_WORKER_POOL_NAME: &str = "node-pool";

const DEFAULT_MASTER_VCPUS: i64 = 2;
const DEFAULT_MASTER_MEMORY_MB: i64 = 16384;
const DEFAULT_WORKER_VCPUS: i64 = 8;
const DEFAULT_WORKER_MEMORY_MB: i64 = 32768;

/// A tenant Kubernetes cluster.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Cluster {
    /// Cluster UUID, assigned by the control plane.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Cluster type, e.g. `vsphere`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// UUID of the infrastructure provider the cluster runs on.
    #[serde(rename = "provider", default, skip_serializing_if = "Option::is_none")]
    pub infra_provider_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
    /// Admin kubeconfig, present once the cluster is ready.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_allocation_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_vip: Option<String>,
    /// Number of load balancer IPs to reserve.
    #[serde(rename = "load_balancer_num", default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_ip_num: Option<i64>,
    /// UUID of the network subnet the nodes draw addresses from.
    #[serde(rename = "subnet_id", default, skip_serializing_if = "Option::is_none")]
    pub subnet_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ntp_pools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ntp_servers: Option<Vec<String>>,
    #[serde(rename = "root_ca_registries", default, skip_serializing_if = "Option::is_none")]
    pub registries_root_ca: Option<Vec<String>>,
    #[serde(rename = "self_signed_registries", default, skip_serializing_if = "Option::is_none")]
    pub registries_self_signed: Option<RegistriesSelfSigned>,
    #[serde(rename = "insecure_registries", default, skip_serializing_if = "Option::is_none")]
    pub registries_insecure: Option<Vec<String>>,
    #[serde(rename = "docker_http_proxy", default, skip_serializing_if = "Option::is_none")]
    pub docker_proxy_http: Option<String>,
    #[serde(rename = "docker_https_proxy", default, skip_serializing_if = "Option::is_none")]
    pub docker_proxy_https: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_bip: Option<String>,
    #[serde(rename = "vsphere_infra", default, skip_serializing_if = "Option::is_none")]
    pub infra: Option<Infra>,
    #[serde(rename = "master_group", default, skip_serializing_if = "Option::is_none")]
    pub master_node_pool: Option<NodePool>,
    #[serde(rename = "node_groups", default, skip_serializing_if = "Option::is_none")]
    pub worker_node_pools: Option<Vec<NodePool>>,
    #[serde(rename = "network_plugin_profile", default, skip_serializing_if = "Option::is_none")]
    pub network_plugin: Option<NetworkPlugin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_as_lb: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nginx_ingress_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etcd_encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_management: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_no_proxy: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routable_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prefix: Option<String>,
    #[serde(rename = "aci_profile", default, skip_serializing_if = "Option::is_none")]
    pub aci_profile_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_iam_enabled: Option<bool>,
}

/// A group of master or worker nodes sharing a template and sizing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NodePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Desired node count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// VM template (tenant image) the nodes are cloned from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcpus: Option<i64>,
    #[serde(rename = "memory_mb", default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpus: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    /// Nodes provisioned for this pool. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
}

/// A provisioned cluster node, as reported by the control plane.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

/// vSphere placement of the cluster VMs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Infra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datastore: Option<String>,
    /// vSphere cluster (not the Kubernetes cluster).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    /// Port groups the nodes attach to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_pool: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RegistriesSelfSigned {
    #[serde(rename = "selfsignedca", default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NetworkPlugin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<NetworkPluginDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NetworkPluginDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,
}

/// Body of a node-pool PATCH. Both fields are always sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodePoolScale {
    pub name: Option<String>,
    pub size: Option<i64>,
}

impl Named for Cluster {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn require_str(value: &Option<String>, field: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

fn require_count(value: Option<i64>, field: &str) -> Result<(), ValidationError> {
    match value {
        Some(v) if v > 0 => Ok(()),
        Some(v) => Err(ValidationError::Field {
            field: field.to_string(),
            message: format!("must be positive (got {})", v),
        }),
        None => Err(ValidationError::missing(field)),
    }
}

impl NodePool {
    /// Checks the attributes every pool needs before the control plane can
    /// provision it: compute template, sizing and SSH credentials.
    fn validate(&self, prefix: &str) -> Result<(), ValidationError> {
        require_str(&self.template, &format!("{prefix}.template"))?;
        require_count(self.vcpus, &format!("{prefix}.vcpus"))?;
        require_count(self.memory, &format!("{prefix}.memory_mb"))?;
        require_str(&self.ssh_user, &format!("{prefix}.ssh_user"))?;
        require_str(&self.ssh_key, &format!("{prefix}.ssh_key"))?;
        Ok(())
    }

    /// The reduced set of checks made before defaults are filled in.
    fn validate_basic(&self, prefix: &str) -> Result<(), ValidationError> {
        require_str(&self.ssh_user, &format!("{prefix}.ssh_user"))?;
        require_str(&self.ssh_key, &format!("{prefix}.ssh_key"))?;
        require_count(self.size, &format!("{prefix}.size"))?;
        require_str(&self.template, &format!("{prefix}.template"))?;
        Ok(())
    }

    fn fill_defaults(&mut self, name: &str, vcpus: i64, memory: i64, version: &Option<String>) {
        self.name.get_or_insert_with(|| name.to_string());
        self.vcpus.get_or_insert(vcpus);
        self.memory.get_or_insert(memory);
        if self.kubernetes_version.is_none() {
            self.kubernetes_version = version.clone();
        }
    }
}

impl Cluster {
    /// Checks the fields the control plane requires to create a cluster.
    ///
    /// Checks run in a fixed order and stop at the first missing field,
    /// whose name is reported in the error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_str(&self.name, "name")?;
        require_str(&self.kubernetes_version, "kubernetes_version")?;

        let master = self
            .master_node_pool
            .as_ref()
            .ok_or_else(|| ValidationError::missing("master_group"))?;
        master.validate("master_group")?;

        let workers = self
            .worker_node_pools
            .as_deref()
            .filter(|pools| !pools.is_empty())
            .ok_or_else(|| ValidationError::missing("node_groups"))?;
        for (i, pool) in workers.iter().enumerate() {
            pool.validate(&format!("node_groups[{i}]"))?;
        }
        Ok(())
    }

    /// Fills the computed defaults into a minimal cluster description.
    ///
    /// The caller supplies a name plus master and worker pools with size,
    /// template and SSH credentials; everything else that has a sensible
    /// default is filled in only where it is still unset:
    ///
    /// - network plugin `calico` with pod CIDR `192.168.0.0/16`
    /// - pool names, vCPU count and memory size
    /// - the Kubernetes version, parsed out of the master template name
    pub fn with_defaults(mut self) -> Result<Self, ValidationError> {
        require_str(&self.name, "name")?;
        let master = self
            .master_node_pool
            .as_mut()
            .ok_or_else(|| ValidationError::missing("master_group"))?;
        master.validate_basic("master_group")?;

        let workers = self
            .worker_node_pools
            .as_mut()
            .filter(|pools| !pools.is_empty())
            .ok_or_else(|| ValidationError::missing("node_groups"))?;
        for (i, pool) in workers.iter().enumerate() {
            pool.validate_basic(&format!("node_groups[{i}]"))?;
        }

        if is_blank(&self.kubernetes_version) {
            self.kubernetes_version = master
                .template
                .as_deref()
                .and_then(kubernetes_version_from_template);
        }
        let version = self.kubernetes_version.clone();

        master.fill_defaults(
            DEFAULT_MASTER_POOL_NAME,
            DEFAULT_MASTER_VCPUS,
            DEFAULT_MASTER_MEMORY_MB,
            &version,
        );
        for pool in workers.iter_mut() {
            pool.fill_defaults(
                DEFAULT_WORKER_POOL_NAME,
                DEFAULT_WORKER_VCPUS,
                DEFAULT_WORKER_MEMORY_MB,
                &version,
            );
        }

        let plugin = self.network_plugin.get_or_insert_with(NetworkPlugin::default);
        plugin
            .name
            .get_or_insert_with(|| DEFAULT_NETWORK_PLUGIN.to_string());
        plugin
            .details
            .get_or_insert_with(NetworkPluginDetails::default)
            .pod_cidr
            .get_or_insert_with(|| DEFAULT_POD_CIDR.to_string());

        Ok(self)
    }

    /// All nodes of the master pool.
    pub fn master_nodes(&self) -> impl Iterator<Item = &Node> {
        self.master_node_pool
            .iter()
            .flat_map(|pool| pool.nodes.iter().flatten())
    }

    /// All nodes across the worker pools.
    pub fn worker_nodes(&self) -> impl Iterator<Item = &Node> {
        self.worker_node_pools
            .iter()
            .flatten()
            .flat_map(|pool| pool.nodes.iter().flatten())
    }
}

/// Extracts the Kubernetes version embedded in a tenant image name.
///
/// Image names are `-` separated and carry the version as the first
/// `major.minor.patch` segment, e.g. `ccp-tenant-image-1.16.3-ubuntu18-6.1.1`
/// yields `1.16.3`.
pub fn kubernetes_version_from_template(template: &str) -> Option<String> {
    template
        .split('-')
        .find(|segment| {
            let parts: Vec<&str> = segment.split('.').collect();
            parts.len() == 3
                && parts
                    .iter()
                    .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        })
        .map(str::to_string)
}
