use super::require_id;
use crate::{
    CcpClient, CcpResult, InfraProvider, core::domain::model::find_by_name,
};

impl CcpClient {
    /// Lists the registered infrastructure providers.
    pub async fn providers(&self) -> CcpResult<Vec<InfraProvider>> {
        self.api_client.get("v3/providers").await
    }

    pub async fn provider(&self, id: &str) -> CcpResult<InfraProvider> {
        require_id("id", id)?;
        self.get_record("provider", &format!("v3/providers/{id}"), id)
            .await
    }

    /// Returns the first provider named exactly `name`.
    pub async fn provider_by_name(&self, name: &str) -> CcpResult<InfraProvider> {
        require_id("name", name)?;
        find_by_name(self.providers().await?, "provider", name)
    }
}
