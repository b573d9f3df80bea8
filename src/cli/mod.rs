//! The `ccpctl` command-line interface.

pub mod args;
pub mod commands;
pub mod output;

use crate::{DEFAULTS_PATH_ENV, DefaultsStore};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::ClusterView;
use std::path::PathBuf;

/// Command-line client for a Kubernetes cluster-provisioning control plane.
///
/// Append `json` anywhere on the command line for indented JSON output.
#[derive(Debug, Parser)]
#[command(name = "ccpctl", author, version, about)]
pub struct Cli {
    /// Defaults file (connection details, defaults, cached token)
    #[arg(long, global = true, env = DEFAULTS_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and cache the session token
    Login,
    /// Save control plane connection details and defaults (key=value ...)
    Setcp {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// Show the saved connection details and defaults
    Getcp,
    /// List tenant clusters
    Getclusters,
    /// Show one cluster, its kubeconfig, nodes or add-ons
    Getcluster {
        name: String,
        #[arg(value_enum)]
        view: Option<ClusterView>,
    },
    /// Create a cluster (key=value overrides, see `addcluster --help`)
    Addcluster {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// Delete a cluster
    Delcluster { name: String },
    /// Resize a worker pool: workers=N [pool=name]
    Scalecluster {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// List infrastructure providers
    Getproviders,
    /// Show one infrastructure provider
    Getprovider { name: String },
    /// List network subnets
    Getsubnets,
    /// Show one network subnet
    Getsubnet { name: String },
    /// List available and installed add-ons of a cluster
    Getaddons { cluster: String },
    /// Install an add-on (dashboard, kubeflow, harbor, logging, monitoring, istio, hx-csi)
    Installaddon { cluster: String, addon: String },
    /// Remove an add-on from a cluster
    Deladdon { cluster: String, addon: String },
    /// Show control plane health
    Health,
}

impl Cli {
    /// `RUST_LOG`-style filter matching the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Runs one command. `json` selects indented JSON output.
pub async fn run(cli: Cli, json: bool) -> Result<()> {
    let store = DefaultsStore::new(
        cli.config
            .clone()
            .unwrap_or_else(DefaultsStore::default_location),
    );
    let mut defaults = store
        .load()
        .await
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    match &cli.command {
        Commands::Login => return commands::login(&store, &mut defaults).await,
        Commands::Getcp => return commands::get_cp(&defaults),
        Commands::Setcp { params } => {
            commands::set_cp(&store, &defaults, params).await?;
            return Ok(());
        }
        _ => {}
    }

    let client = commands::client_from_defaults(&defaults).await?;
    commands::refresh_session(&client, &store, &mut defaults).await?;

    match cli.command {
        Commands::Getclusters => commands::get_clusters(&client, json).await,
        Commands::Getcluster { name, view } => {
            commands::get_cluster(&client, &name, view, json).await
        }
        Commands::Addcluster { name, params } => {
            commands::add_cluster(&client, &name, &params, &defaults, json).await
        }
        Commands::Delcluster { name } => commands::delete_cluster(&client, &name).await,
        Commands::Scalecluster { name, params } => {
            commands::scale_cluster(&client, &name, &params, json).await
        }
        Commands::Getproviders => commands::get_providers(&client, json).await,
        Commands::Getprovider { name } => commands::get_provider(&client, &name, json).await,
        Commands::Getsubnets => commands::get_subnets(&client, json).await,
        Commands::Getsubnet { name } => commands::get_subnet(&client, &name, json).await,
        Commands::Getaddons { cluster } => commands::get_addons(&client, &cluster, json).await,
        Commands::Installaddon { cluster, addon } => {
            commands::install_addon(&client, &cluster, &addon).await
        }
        Commands::Deladdon { cluster, addon } => {
            commands::delete_addon(&client, &cluster, &addon).await
        }
        Commands::Health => commands::health(&client, json).await,
        Commands::Login | Commands::Getcp | Commands::Setcp { .. } => Ok(()),
    }
}
