use super::require_id;
use crate::{Cluster, CcpClient, CcpResult, NodePoolScale, core::domain::model::find_by_name};
use tracing::info;

impl CcpClient {
    /// Lists every tenant cluster.
    pub async fn clusters(&self) -> CcpResult<Vec<Cluster>> {
        self.api_client.get("v3/clusters").await
    }

    /// Fetches a cluster by UUID.
    ///
    /// # Errors
    /// `Validation` for an empty id, `NotFound` when the server answers 404.
    pub async fn cluster(&self, id: &str) -> CcpResult<Cluster> {
        require_id("id", id)?;
        self.get_record("cluster", &format!("v3/clusters/{id}"), id)
            .await
    }

    /// Returns the first cluster named exactly `name`.
    pub async fn cluster_by_name(&self, name: &str) -> CcpResult<Cluster> {
        require_id("name", name)?;
        find_by_name(self.clusters().await?, "cluster", name)
    }

    /// Creates a cluster from a fully specified description.
    ///
    /// The description is validated first; nothing is sent when a required
    /// field is missing.
    pub async fn create_cluster(&self, cluster: &Cluster) -> CcpResult<Cluster> {
        cluster.validate()?;
        let created: Cluster = self.api_client.post("v3/clusters/", cluster).await?;
        info!(
            name = created.name.as_deref(),
            uuid = created.uuid.as_deref(),
            "cluster creation requested"
        );
        Ok(created)
    }

    /// Creates a cluster after filling in sizing, naming, network plugin and
    /// Kubernetes version defaults. See [`Cluster::with_defaults`].
    pub async fn create_cluster_with_defaults(&self, cluster: Cluster) -> CcpResult<Cluster> {
        let cluster = cluster.with_defaults()?;
        self.create_cluster(&cluster).await
    }

    /// Like [`create_cluster_with_defaults`](Self::create_cluster_with_defaults),
    /// but when the cluster names no infrastructure provider it is placed on
    /// the provider called `provider_name`.
    ///
    /// # Errors
    /// `Validation` before any request when a required field is missing,
    /// `NotFound` when no provider has that name.
    pub async fn create_cluster_on_provider(
        &self,
        cluster: Cluster,
        provider_name: &str,
    ) -> CcpResult<Cluster> {
        let mut cluster = cluster.with_defaults()?;
        if cluster
            .infra_provider_uuid
            .as_deref()
            .is_none_or(|uuid| uuid.trim().is_empty())
        {
            require_id("provider_name", provider_name)?;
            let provider = self.provider_by_name(provider_name).await?;
            cluster.infra_provider_uuid = provider.uuid;
        }
        self.create_cluster(&cluster).await
    }

    /// Resizes one node pool of a cluster.
    pub async fn scale_cluster(&self, id: &str, pool: &str, size: i64) -> CcpResult<NodePoolScale> {
        require_id("id", id)?;
        require_id("pool", pool)?;
        let body = NodePoolScale {
            name: Some(pool.to_string()),
            size: Some(size),
        };
        self.api_client
            .patch(&format!("v3/clusters/{id}/node-pools/{pool}/"), &body)
            .await
    }

    pub async fn delete_cluster(&self, id: &str) -> CcpResult<()> {
        require_id("id", id)?;
        self.api_client
            .delete(&format!("v3/clusters/{id}/"))
            .await?;
        info!(uuid = id, "cluster deletion requested");
        Ok(())
    }
}
