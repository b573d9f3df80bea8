use super::super::{TEST_TOKEN, create_authenticated_client};
use crate::{AUTH_TOKEN_HEADER, CcpError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn test_subnets_success() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/network-service/subnets"))
        .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "s-1",
                "name": "default-network-subnet",
                "cidr": "10.10.0.0/24",
                "gateway": "10.10.0.1",
                "nameservers": ["10.10.0.2", "10.10.0.3"]
            }
        ])))
        .mount(&mock_server)
        .await;

    let subnets = client.subnets().await.unwrap();
    assert_eq!(subnets.len(), 1);
    assert_eq!(subnets[0].nameservers.as_ref().map(Vec::len), Some(2));

    let subnet = client.subnet_by_name("default-network-subnet").await.unwrap();
    assert_eq!(subnet.uuid.as_deref(), Some("s-1"));
}

#[tokio::test]
async fn test_subnets_empty() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/network-service/subnets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let subnets = client.subnets().await.unwrap();
    assert!(subnets.is_empty());
}

#[tokio::test]
async fn test_subnet_by_name_not_found() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/network-service/subnets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    assert!(client.subnets().await.unwrap().is_empty());
    let err = client.subnet_by_name("vlan10").await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot find subnet vlan10");
}

#[tokio::test]
async fn test_subnet_by_id() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/network-service/subnets/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "s-1",
            "cidr": "10.10.0.0/24"
        })))
        .mount(&mock_server)
        .await;

    let subnet = client.subnet("s-1").await.unwrap();
    assert_eq!(subnet.cidr.as_deref(), Some("10.10.0.0/24"));
    assert!(matches!(client.subnet(" ").await, Err(CcpError::Validation(_))));
}
