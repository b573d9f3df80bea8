//! ccpctl command implementations.

use super::{
    args::{parse_count, parse_params},
    output::{
        ADDCLUSTER_USAGE, SCALECLUSTER_USAGE, SETCP_USAGE, cluster_line, node_line, print_json,
        print_list, print_note, print_success, print_usage, provider_line, subnet_line,
    },
};
use crate::{
    AddonKind, CcpClient, Cluster, DEFAULT_POD_CIDR, DEFAULT_WORKER_POOL_NAME, Defaults,
    DefaultsStore, Infra, NetworkPlugin, NetworkPluginDetails, NodePool, DEFAULT_NETWORK_PLUGIN,
};
use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;

/// What `getcluster` shows besides the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClusterView {
    Kubeconfig,
    Masters,
    Workers,
    Addons,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Builds a client from the saved connection details, reusing the cached
/// session token when there is one.
pub async fn client_from_defaults(defaults: &Defaults) -> Result<CcpClient> {
    let url = non_empty(&defaults.cp_url)
        .context("cpurl is not set, run `ccpctl setcp cpurl=...`")?;
    let user = non_empty(&defaults.cp_user)
        .context("cpuser is not set, run `ccpctl setcp cpuser=...`")?;
    let pass = non_empty(&defaults.cp_pass)
        .context("cppass is not set, run `ccpctl setcp cppass=...`")?;

    let mut builder = CcpClient::builder().url(url).credentials(user, pass);
    if let Some(token) = defaults.session_token() {
        builder = builder.with_token(token);
    }
    builder
        .build()
        .await
        .context("invalid control plane settings")
}

/// Logs in when the cached token is absent or stale, and persists the new
/// token and its issue time.
pub async fn refresh_session(
    client: &CcpClient,
    store: &DefaultsStore,
    defaults: &mut Defaults,
) -> Result<()> {
    let refreshed = client
        .login_if_stale()
        .await
        .context("login to control plane failed")?;
    if refreshed {
        print_note("Logged in again");
        persist_token(client, store, defaults).await?;
    }
    Ok(())
}

async fn persist_token(client: &CcpClient, store: &DefaultsStore, defaults: &mut Defaults) -> Result<()> {
    if let Some(token) = client.auth_token().await {
        defaults.store_session_token(&token);
        store
            .save(defaults)
            .await
            .with_context(|| format!("failed to write {}", store.path().display()))?;
    }
    Ok(())
}

pub async fn login(store: &DefaultsStore, defaults: &mut Defaults) -> Result<()> {
    let client = client_from_defaults(defaults).await?;
    client.login().await.context("login to control plane failed")?;
    persist_token(&client, store, defaults).await?;
    print_success(&format!("Logged in to {}", client.connection().url().as_str()));
    Ok(())
}

pub fn get_cp(defaults: &Defaults) -> Result<()> {
    print_json(defaults)
}

/// Names given on `setcp` that still have to be resolved to UUIDs.
#[derive(Debug, Default, PartialEq)]
struct PendingLookups {
    provider: Option<String>,
    subnet: Option<String>,
}

/// Applies the plain `setcp` parameters and collects the lookups.
fn apply_setcp_params(defaults: &mut Defaults, params: &[(String, String)]) -> Result<PendingLookups> {
    let mut pending = PendingLookups::default();
    for (key, value) in params {
        let value = value.clone();
        match key.as_str() {
            "cpname" => defaults.cp_name = Some(value),
            "cpurl" => {
                if defaults.cp_url.as_ref() != Some(&value) {
                    defaults.token = None;
                    defaults.token_time = None;
                }
                defaults.cp_url = Some(value);
            }
            "cpuser" => {
                if defaults.cp_user.as_ref() != Some(&value) {
                    defaults.token = None;
                    defaults.token_time = None;
                }
                defaults.cp_user = Some(value);
            }
            "cppass" => defaults.cp_pass = Some(value),
            "sshuser" => defaults.ssh_user = Some(value),
            "sshkey" => defaults.ssh_key = Some(value),
            "clusterdfl" => defaults.cluster = Some(value),
            "datastoredfl" => defaults.datastore = Some(value),
            "datacenterdfl" => defaults.datacenter = Some(value),
            "networkdfl" => defaults.network = Some(value),
            "vsclusterdfl" => defaults.vs_cluster = Some(value),
            "imagedfl" => defaults.image = Some(value),
            "providerdfl" => pending.provider = Some(value),
            "subnetdfl" => pending.subnet = Some(value),
            _ => bail!("unknown setcp parameter '{key}'"),
        }
        print_note(&format!("{key} updated"));
    }
    Ok(pending)
}

fn require_connection_settings(defaults: &Defaults) -> Result<()> {
    for (key, value) in [
        ("cpurl", &defaults.cp_url),
        ("cpuser", &defaults.cp_user),
        ("cppass", &defaults.cp_pass),
    ] {
        if non_empty(value).is_none() {
            bail!("{key} is missing");
        }
    }
    Ok(())
}

/// Updates the saved connection details and defaults. Nothing is written
/// unless every step succeeds.
pub async fn set_cp(store: &DefaultsStore, defaults: &Defaults, raw: &[String]) -> Result<Defaults> {
    if raw.is_empty() {
        print_usage(SETCP_USAGE);
        bail!("setcp needs at least one key=value parameter");
    }

    let mut updated = defaults.clone();
    let pending = parse_params(raw)
        .and_then(|params| apply_setcp_params(&mut updated, &params))
        .inspect_err(|_| print_usage(SETCP_USAGE))?;

    if pending != PendingLookups::default() {
        let client = client_from_defaults(&updated).await?;
        if client.login_if_stale().await.context("login to control plane failed")? {
            if let Some(token) = client.auth_token().await {
                updated.store_session_token(&token);
            }
        }

        if let Some(name) = pending.provider {
            let provider = client.provider_by_name(&name).await?;
            let uuid = provider
                .uuid
                .ok_or_else(|| anyhow!("provider {name} has no UUID"))?;
            print_note(&format!("providerdfl set to {name} ({uuid})"));
            updated.provider = Some(name);
            updated.provider_uuid = Some(uuid);
        }
        if let Some(name) = pending.subnet {
            let subnet = client.subnet_by_name(&name).await?;
            let uuid = subnet
                .uuid
                .ok_or_else(|| anyhow!("subnet {name} has no UUID"))?;
            print_note(&format!("subnetdfl set to {name} ({uuid})"));
            updated.subnet = Some(name);
            updated.subnet_uuid = Some(uuid);
        }
    }

    require_connection_settings(&updated).inspect_err(|_| print_usage(SETCP_USAGE))?;
    store
        .save(&updated)
        .await
        .with_context(|| format!("failed to write {}", store.path().display()))?;
    print_success("Control plane settings saved");
    Ok(updated)
}

pub async fn get_clusters(client: &CcpClient, json: bool) -> Result<()> {
    let clusters = client.clusters().await?;
    print_list(&clusters, json, cluster_line)
}

pub async fn get_cluster(
    client: &CcpClient,
    name: &str,
    view: Option<ClusterView>,
    json: bool,
) -> Result<()> {
    let cluster = client.cluster_by_name(name).await?;
    match view {
        None if json => print_json(&cluster),
        None => {
            println!("{}", cluster_line(&cluster));
            Ok(())
        }
        Some(ClusterView::Kubeconfig) => {
            let kubeconfig = non_empty(&cluster.kubeconfig)
                .ok_or_else(|| anyhow!("cluster {name} has no kubeconfig yet"))?;
            println!("{kubeconfig}");
            Ok(())
        }
        Some(ClusterView::Masters) => {
            let nodes: Vec<_> = cluster.master_nodes().cloned().collect();
            print_list(&nodes, json, node_line)
        }
        Some(ClusterView::Workers) => {
            let nodes: Vec<_> = cluster.worker_nodes().cloned().collect();
            print_list(&nodes, json, node_line)
        }
        Some(ClusterView::Addons) => show_addons(client, &cluster, json).await,
    }
}

pub async fn get_addons(client: &CcpClient, cluster_name: &str, json: bool) -> Result<()> {
    let cluster = client.cluster_by_name(cluster_name).await?;
    show_addons(client, &cluster, json).await
}

fn cluster_uuid<'a>(cluster: &'a Cluster, name: &str) -> Result<&'a str> {
    non_empty(&cluster.uuid).ok_or_else(|| anyhow!("cluster {name} has no UUID"))
}

async fn show_addons(client: &CcpClient, cluster: &Cluster, json: bool) -> Result<()> {
    let name = cluster.name.as_deref().unwrap_or_default();
    let uuid = cluster_uuid(cluster, name)?;
    let catalogue = client.addon_catalogue(uuid).await?;
    let installed = client.installed_addons(uuid).await?;

    if json {
        return print_json(&serde_json::json!({
            "catalogue": catalogue,
            "installed": installed,
        }));
    }

    println!("Add-ons available:");
    for kind in AddonKind::ALL {
        match kind.entry(&catalogue) {
            Some(entry) => println!(
                "  {:<12} {}  {}",
                kind.alias(),
                entry.name.as_deref().unwrap_or(kind.catalogue_key()),
                entry.description.as_deref().unwrap_or_default()
            ),
            None => println!("  {:<12} (not offered)", kind.alias()),
        }
    }

    println!("Cluster {} installed add-ons: {}", name, installed.count);
    for addon in &installed.results {
        let status = addon.status.clone().unwrap_or_default();
        println!(
            "  {}  Status: {}  Helm status: {}",
            addon.name.as_deref().unwrap_or("-"),
            status.status.as_deref().unwrap_or("-"),
            status.helm_status.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

/// Builds the cluster description `addcluster` sends, taking each value
/// from the parameters first and the saved defaults second.
pub fn build_cluster(name: &str, raw: &[String], defaults: &Defaults) -> Result<Cluster> {
    let params = parse_params(raw)?;

    let mut name = name.to_string();
    let mut image = None;
    let mut workers = 0;
    let mut masters = 0;
    let mut load_balancers = 0;
    let mut datastore = None;
    let mut datacenter = None;
    let mut networks = Vec::new();
    let mut vs_cluster = None;
    let mut provider_uuid = None;
    let mut subnet_uuid = None;
    let mut pod_cidr = None;
    let mut version = None;

    for (key, value) in params {
        match key.as_str() {
            "name" => name = value,
            "image" => image = Some(value),
            "workers" => workers = parse_count(&key, &value)?,
            "masters" => masters = parse_count(&key, &value)?,
            "loadbalancers" => load_balancers = parse_count(&key, &value)?,
            "datastore" => datastore = Some(value),
            "dc" => datacenter = Some(value),
            "network" => networks.push(value),
            "vscluster" => vs_cluster = Some(value),
            "provideruuid" => provider_uuid = Some(value),
            "subnetuuid" => subnet_uuid = Some(value),
            "podcidr" => pod_cidr = Some(value),
            "version" => version = Some(value),
            _ => bail!("unknown addcluster parameter '{key}'"),
        }
    }

    if name.trim().is_empty() {
        bail!("cluster name is blank");
    }

    let pick = |given: Option<String>, fallback: &Option<String>, what: &str, key: &str| {
        given
            .filter(|v| !v.trim().is_empty())
            .or_else(|| non_empty(fallback).map(str::to_string))
            .ok_or_else(|| anyhow!("{what} is blank and has no default, pass it or set {key} with setcp"))
    };

    let image = pick(image, &defaults.image, "image", "imagedfl")?;
    let datastore = pick(datastore, &defaults.datastore, "datastore", "datastoredfl")?;
    let datacenter = pick(datacenter, &defaults.datacenter, "dc", "datacenterdfl")?;
    let vs_cluster = pick(vs_cluster, &defaults.vs_cluster, "vscluster", "vsclusterdfl")?;
    let provider_uuid = pick(provider_uuid, &defaults.provider_uuid, "provideruuid", "providerdfl")?;
    let subnet_uuid = pick(subnet_uuid, &defaults.subnet_uuid, "subnetuuid", "subnetdfl")?;
    if networks.is_empty() {
        networks.push(pick(None, &defaults.network, "network", "networkdfl")?);
    }

    let ssh_user = non_empty(&defaults.ssh_user)
        .context("SSH user is blank, set sshuser with setcp")?
        .to_string();
    let ssh_key = non_empty(&defaults.ssh_key)
        .context("SSH key is blank, set sshkey with setcp")?
        .to_string();

    let workers = if workers < 1 { 1 } else { workers };
    let masters = match masters {
        0 => 1,
        1 | 3 => masters,
        other => bail!("masters must be 1 or 3, got {other}"),
    };
    let load_balancers = if load_balancers < 1 { 2 } else { load_balancers };

    let pool = |size: i64| NodePool {
        size: Some(size),
        template: Some(image.clone()),
        ssh_user: Some(ssh_user.clone()),
        ssh_key: Some(ssh_key.clone()),
        ..Default::default()
    };

    Ok(Cluster {
        name: Some(name),
        cluster_type: Some("vsphere".to_string()),
        kubernetes_version: version,
        infra_provider_uuid: Some(provider_uuid),
        subnet_uuid: Some(subnet_uuid),
        load_balancer_ip_num: Some(load_balancers),
        ip_allocation_method: Some("ccpnet".to_string()),
        aws_iam_enabled: Some(false),
        infra: Some(Infra {
            datastore: Some(datastore),
            datacenter: Some(datacenter),
            networks: Some(networks),
            cluster: Some(vs_cluster),
            ..Default::default()
        }),
        master_node_pool: Some(pool(masters)),
        worker_node_pools: Some(vec![pool(workers)]),
        network_plugin: Some(NetworkPlugin {
            name: Some(DEFAULT_NETWORK_PLUGIN.to_string()),
            details: Some(NetworkPluginDetails {
                pod_cidr: Some(pod_cidr.unwrap_or_else(|| DEFAULT_POD_CIDR.to_string())),
            }),
        }),
        ..Default::default()
    })
}

pub async fn add_cluster(
    client: &CcpClient,
    name: &str,
    raw: &[String],
    defaults: &Defaults,
    json: bool,
) -> Result<()> {
    let cluster = build_cluster(name, raw, defaults).inspect_err(|_| print_usage(ADDCLUSTER_USAGE))?;
    print_note(&format!("Sending new cluster {name} to be created"));

    let created = client.create_cluster_with_defaults(cluster).await?;
    if json {
        return print_json(&created);
    }
    print_success(&format!(
        "Cluster {} created ({})",
        created.name.as_deref().unwrap_or(name),
        created.uuid.as_deref().unwrap_or("-")
    ));
    Ok(())
}

pub async fn delete_cluster(client: &CcpClient, name: &str) -> Result<()> {
    let cluster = client.cluster_by_name(name).await?;
    client.delete_cluster(cluster_uuid(&cluster, name)?).await?;
    print_success(&format!("Cluster {name} deleted"));
    Ok(())
}

pub async fn scale_cluster(client: &CcpClient, name: &str, raw: &[String], json: bool) -> Result<()> {
    let mut workers = None;
    let mut pool = DEFAULT_WORKER_POOL_NAME.to_string();
    for (key, value) in parse_params(raw).inspect_err(|_| print_usage(SCALECLUSTER_USAGE))? {
        match key.as_str() {
            "workers" => workers = Some(parse_count(&key, &value)?),
            "pool" => pool = value,
            _ => {
                print_usage(SCALECLUSTER_USAGE);
                bail!("unknown scalecluster parameter '{key}'");
            }
        }
    }
    let Some(workers) = workers else {
        print_usage(SCALECLUSTER_USAGE);
        bail!("workers=N is required");
    };

    let cluster = client.cluster_by_name(name).await?;
    let scaled = client
        .scale_cluster(cluster_uuid(&cluster, name)?, &pool, workers)
        .await?;
    if json {
        return print_json(&scaled);
    }
    print_success(&format!("Pool {pool} of cluster {name} scaled to {workers}"));
    Ok(())
}

pub async fn get_providers(client: &CcpClient, json: bool) -> Result<()> {
    let providers = client.providers().await?;
    print_list(&providers, json, provider_line)
}

pub async fn get_provider(client: &CcpClient, name: &str, json: bool) -> Result<()> {
    let provider = client.provider_by_name(name).await?;
    if json {
        return print_json(&provider);
    }
    println!("{}", provider_line(&provider));
    Ok(())
}

pub async fn get_subnets(client: &CcpClient, json: bool) -> Result<()> {
    let subnets = client.subnets().await?;
    print_list(&subnets, json, subnet_line)
}

pub async fn get_subnet(client: &CcpClient, name: &str, json: bool) -> Result<()> {
    let subnet = client.subnet_by_name(name).await?;
    if json {
        return print_json(&subnet);
    }
    println!("{}", subnet_line(&subnet));
    Ok(())
}

pub async fn install_addon(client: &CcpClient, cluster_name: &str, addon: &str) -> Result<()> {
    let kind: AddonKind = addon.parse()?;
    let cluster = client.cluster_by_name(cluster_name).await?;
    let uuid = cluster_uuid(&cluster, cluster_name)?;

    let catalogue = client.addon_catalogue(uuid).await?;
    let entry = kind
        .entry(&catalogue)
        .ok_or_else(|| anyhow!("add-on {kind} is not offered for cluster {cluster_name}"))?;
    client.install_addon(uuid, entry).await?;
    print_success(&format!("Add-on {kind} installing on {cluster_name}"));
    Ok(())
}

pub async fn delete_addon(client: &CcpClient, cluster_name: &str, addon: &str) -> Result<()> {
    let kind: AddonKind = addon.parse()?;
    let cluster = client.cluster_by_name(cluster_name).await?;
    client
        .delete_addon(cluster_uuid(&cluster, cluster_name)?, kind.catalogue_key())
        .await?;
    print_success(&format!("Add-on {kind} removed from {cluster_name}"));
    Ok(())
}

pub async fn health(client: &CcpClient, json: bool) -> Result<()> {
    let liveness = client.liveness_health().await?;
    let health = client.health().await?;
    if json {
        return print_json(&serde_json::json!({
            "liveness": liveness,
            "health": health,
        }));
    }

    println!(
        "Version: {}  Management host time: {}",
        liveness.cx_version.as_deref().unwrap_or("-"),
        liveness.time_on_mgmt_host.as_deref().unwrap_or("-"),
    );
    println!(
        "System health: {}  Nodes: {}/{}",
        health.total_system_health.as_deref().unwrap_or("-"),
        health.current_nodes.unwrap_or_default(),
        health.expected_nodes.unwrap_or_default(),
    );
    for node in health.nodes_status.iter().flatten() {
        println!(
            "  {}  {}: {}",
            node.node_name.as_deref().unwrap_or("-"),
            node.node_condition.as_deref().unwrap_or("-"),
            node.node_status.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
