pub mod addon;
pub mod cluster;
pub mod connection;
pub mod defaults;
pub mod health;
pub mod provider;
pub mod subnet;

use crate::core::domain::error::{CcpError, CcpResult};

/// A record that can be looked up by its display name.
pub trait Named {
    fn name(&self) -> Option<&str>;
}

/// Returns the first record whose name equals `name` exactly.
pub(crate) fn find_by_name<T: Named>(items: Vec<T>, resource: &str, name: &str) -> CcpResult<T> {
    items
        .into_iter()
        .find(|item| item.name() == Some(name))
        .ok_or_else(|| CcpError::not_found(resource, name))
}
