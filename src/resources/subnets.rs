use super::require_id;
use crate::{CcpClient, CcpResult, NetworkSubnet, core::domain::model::find_by_name};

impl CcpClient {
    /// Lists the network subnets available for cluster addressing.
    pub async fn subnets(&self) -> CcpResult<Vec<NetworkSubnet>> {
        self.api_client.get("v3/network-service/subnets").await
    }

    pub async fn subnet(&self, id: &str) -> CcpResult<NetworkSubnet> {
        require_id("id", id)?;
        self.get_record("subnet", &format!("v3/network-service/subnets/{id}"), id)
            .await
    }

    pub async fn subnet_by_name(&self, name: &str) -> CcpResult<NetworkSubnet> {
        require_id("name", name)?;
        find_by_name(self.subnets().await?, "subnet", name)
    }
}
