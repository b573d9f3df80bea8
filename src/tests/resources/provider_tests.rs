use super::super::{TEST_TOKEN, create_authenticated_client};
use crate::{AUTH_TOKEN_HEADER, CcpError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn providers_body() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "p-1",
            "type": "vsphere",
            "name": "vsphere",
            "address": "vcenter.lab.local",
            "port": 443,
            "username": "administrator@vsphere.local",
            "insecure_skip_verify": true
        },
        {
            "id": "p-2",
            "type": "vsphere",
            "name": "vsphere",
            "address": "vcenter2.lab.local"
        }
    ])
}

#[tokio::test]
async fn test_providers_success() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/providers"))
        .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(providers_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let providers = client.providers().await.unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0].port, Some(443));
    assert_eq!(providers[0].insecure_skip_verify, Some(true));
    assert_eq!(providers[1].username, None);
}

#[tokio::test]
async fn test_provider_by_name_first_match_wins() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(providers_body()))
        .mount(&mock_server)
        .await;

    let provider = client.provider_by_name("vsphere").await.unwrap();
    assert_eq!(provider.uuid.as_deref(), Some("p-1"));

    let err = client.provider_by_name("openstack").await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot find provider openstack");
}

#[tokio::test]
async fn test_provider_by_id() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/providers/p-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "p-2",
            "name": "lab"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/providers/p-9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    assert_eq!(client.provider("p-2").await.unwrap().name.as_deref(), Some("lab"));
    assert!(matches!(
        client.provider("p-9").await,
        Err(CcpError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_providers_empty() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    assert!(client.providers().await.unwrap().is_empty());
    assert!(matches!(
        client.provider_by_name("vsphere").await,
        Err(CcpError::NotFound { .. })
    ));
}
