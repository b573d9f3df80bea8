pub mod api_client;
pub mod defaults_store;
