use super::super::create_authenticated_client;
use crate::CcpError;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_liveness_health() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/2/system/livenessHealth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "CXVersion": "6.1.1",
            "TimeOnMgmtHost": "2020-03-04T10:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let liveness = client.liveness_health().await.unwrap();
    assert_eq!(liveness.cx_version.as_deref(), Some("6.1.1"));
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/2/system/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "TotalSystemHealth": "Healthy",
            "CurrentNodes": 3,
            "ExpectedNodes": 3,
            "NodesStatus": [
                {
                    "NodeName": "cp-master-1",
                    "NodeCondition": "Ready",
                    "NodeStatus": "True",
                    "LastTransitionTime": "2020-03-04T09:00:00Z"
                }
            ],
            "PodStatusList": []
        })))
        .mount(&mock_server)
        .await;

    let health = client.health().await.unwrap();
    assert_eq!(health.total_system_health.as_deref(), Some("Healthy"));
    assert_eq!(health.current_nodes, Some(3));
    let nodes = health.nodes_status.unwrap();
    assert_eq!(nodes[0].node_name.as_deref(), Some("cp-master-1"));
    assert_eq!(health.pod_status_list, Some(vec![]));
}

#[tokio::test]
async fn test_health_unavailable() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/2/system/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upgrading"))
        .mount(&mock_server)
        .await;

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, CcpError::Api { status: 503, .. }));
}
