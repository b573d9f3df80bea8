use crate::{CcpClient, CcpResult, Health, LivenessHealth};

impl CcpClient {
    /// Lightweight liveness probe: version and management host clock.
    pub async fn liveness_health(&self) -> CcpResult<LivenessHealth> {
        self.api_client.get("2/system/livenessHealth").await
    }

    /// Node and pod level health of the control plane itself.
    pub async fn health(&self) -> CcpResult<Health> {
        self.api_client.get("2/system/health").await
    }
}
