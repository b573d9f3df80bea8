//! Output formatting for ccpctl.
//!
//! Results go to stdout, either as one summary line per record or, with
//! `json`, as indented JSON. Usage text and progress notes go to stderr.

use crate::{Cluster, InfraProvider, NetworkSubnet, Node};
use colored::Colorize;
use serde::Serialize;

pub const SETCP_USAGE: &str = "\
usage: ccpctl setcp key=value...
    cpurl=https://10.100.100.1      required
    cpuser=admin                    required
    cppass=password                 required
    cpname=name
    sshuser=ccpadmin
    sshkey='ecdsa-sha2-nistp521 AAAA...'
    clusterdfl=clustername
    providerdfl=providername        resolved to its UUID
    subnetdfl=subnetname            resolved to its UUID
    datastoredfl=datastore
    datacenterdfl=dc
    networkdfl=portgroup
    vsclusterdfl=vsphereclustername
    imagedfl=ccp-tenant-image-1.16.3-ubuntu18-6.1.1";

pub const ADDCLUSTER_USAGE: &str = "\
usage: ccpctl addcluster <clustername> [key=value...]
    image=ccpimage          default from setcp imagedfl
    workers=1               default 1
    masters=1               1 or 3, default 1
    loadbalancers=2         default 2
    datastore=datastore     default from setcp datastoredfl
    dc=datacenter           default from setcp datacenterdfl
    network=portgroup       repeatable, default from setcp networkdfl
    vscluster=cluster       default from setcp vsclusterdfl
    provideruuid=uuid       default from setcp providerdfl
    subnetuuid=uuid         default from setcp subnetdfl
    podcidr=cidr            default 192.168.0.0/16
    version=1.16.3          default taken from the image name";

pub const SCALECLUSTER_USAGE: &str = "\
usage: ccpctl scalecluster <clustername> workers=N [pool=poolname]";

/// Prints a value as indented JSON.
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Progress note, kept off stdout so JSON output stays parseable.
pub fn print_note(message: &str) {
    eprintln!("{} {}", "*".cyan(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn print_usage(usage: &str) {
    eprintln!("{}", usage.yellow());
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn cluster_line(cluster: &Cluster) -> String {
    format!(
        "Cluster: {}  Status: {}  Type: {}  UUID: {}",
        or_dash(cluster.name.as_deref()).bold(),
        or_dash(cluster.status.as_deref()),
        or_dash(cluster.cluster_type.as_deref()),
        or_dash(cluster.uuid.as_deref()),
    )
}

pub fn node_line(node: &Node) -> String {
    format!(
        "Node: {}  Status: {}  Public IP: {}  Private IP: {}",
        or_dash(node.name.as_deref()).bold(),
        or_dash(node.status.as_deref()),
        or_dash(node.public_ip.as_deref()),
        or_dash(node.private_ip.as_deref()),
    )
}

pub fn provider_line(provider: &InfraProvider) -> String {
    format!(
        "Provider: {}  Type: {}  Address: {}  UUID: {}",
        or_dash(provider.name.as_deref()).bold(),
        or_dash(provider.provider_type.as_deref()),
        or_dash(provider.address.as_deref()),
        or_dash(provider.uuid.as_deref()),
    )
}

pub fn subnet_line(subnet: &NetworkSubnet) -> String {
    format!(
        "Subnet: {}  CIDR: {}  Gateway: {}  UUID: {}",
        or_dash(subnet.name.as_deref()).bold(),
        or_dash(subnet.cidr.as_deref()),
        or_dash(subnet.gateway.as_deref()),
        or_dash(subnet.uuid.as_deref()),
    )
}

/// Prints records either as one JSON array or one line each.
pub fn print_list<T, F>(items: &[T], json: bool, line: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("{}", "No results found".yellow());
        return Ok(());
    }
    for item in items {
        println!("{}", line(item));
    }
    Ok(())
}
