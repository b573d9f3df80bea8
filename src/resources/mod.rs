//! Control-plane resources, exposed as methods on [`CcpClient`].

mod addons;
mod clusters;
mod providers;
mod subnets;
mod system;

use crate::{CcpClient, CcpError, CcpResult, ValidationError};
use serde::de::DeserializeOwned;

/// Rejects an empty identifier before anything is sent.
fn require_id(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

impl CcpClient {
    /// GETs a single record, reporting a 404 as `NotFound`.
    async fn get_record<T>(&self, resource: &str, path: &str, id: &str) -> CcpResult<T>
    where
        T: DeserializeOwned,
    {
        self.api_client.get(path).await.map_err(|e| match e.status() {
            Some(404) => CcpError::not_found(resource, id),
            _ => e,
        })
    }
}
