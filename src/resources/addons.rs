use super::require_id;
use crate::{AddonCatalogue, CatalogueEntry, CcpClient, CcpResult, InstalledAddons};
use reqwest::Method;
use tracing::info;

impl CcpClient {
    /// Lists the add-ons that can be installed on a cluster.
    pub async fn addon_catalogue(&self, cluster_id: &str) -> CcpResult<AddonCatalogue> {
        require_id("cluster_id", cluster_id)?;
        self.api_client
            .get(&format!("v3/clusters/{cluster_id}/catalog"))
            .await
    }

    pub async fn installed_addons(&self, cluster_id: &str) -> CcpResult<InstalledAddons> {
        require_id("cluster_id", cluster_id)?;
        self.api_client
            .get(&format!("v3/clusters/{cluster_id}/addons"))
            .await
    }

    /// Installs a catalogue entry on a cluster. Installation proceeds in
    /// the background on the control plane.
    pub async fn install_addon(&self, cluster_id: &str, addon: &CatalogueEntry) -> CcpResult<()> {
        require_id("cluster_id", cluster_id)?;
        self.api_client
            .execute(
                Method::POST,
                &format!("v3/clusters/{cluster_id}/addons/"),
                Some(addon),
            )
            .await?;
        info!(cluster_id, addon = addon.name.as_deref(), "add-on install requested");
        Ok(())
    }

    pub async fn delete_addon(&self, cluster_id: &str, name: &str) -> CcpResult<()> {
        require_id("cluster_id", cluster_id)?;
        require_id("name", name)?;
        self.api_client
            .delete(&format!("v3/clusters/{cluster_id}/addons/{name}/"))
            .await?;
        info!(cluster_id, addon = name, "add-on delete requested");
        Ok(())
    }
}
