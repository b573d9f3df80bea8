mod resources;

use crate::{AuthToken, CcpClient};
use wiremock::MockServer;

pub(crate) const TEST_TOKEN: &str = "test-token";

/// A client pointed at the mock server that already holds a fresh token,
/// so no login request is made.
pub(crate) async fn create_authenticated_client(mock_server: &MockServer) -> CcpClient {
    CcpClient::builder()
        .url(mock_server.uri())
        .credentials("admin", "secret")
        .with_token(AuthToken::new_unchecked(TEST_TOKEN.to_string()))
        .build()
        .await
        .unwrap()
}
