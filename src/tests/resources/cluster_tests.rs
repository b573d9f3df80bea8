use super::super::{TEST_TOKEN, create_authenticated_client};
use crate::{AUTH_TOKEN_HEADER, CcpError, Cluster, NodePool, ValidationError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, header, method, path},
};

fn pool(size: i64) -> NodePool {
    NodePool {
        size: Some(size),
        template: Some("img-1.16.3-ubuntu18".to_string()),
        ssh_user: Some("u".to_string()),
        ssh_key: Some("k".to_string()),
        ..Default::default()
    }
}

fn demo_cluster() -> Cluster {
    Cluster {
        name: Some("demo".to_string()),
        master_node_pool: Some(pool(1)),
        worker_node_pools: Some(vec![pool(2)]),
        ..Default::default()
    }
}

async fn expect_no_requests(mock_server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_clusters_success() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "c-1",
                "name": "demo",
                "type": "vsphere",
                "status": "READY",
                "master_group": {
                    "name": "master-group",
                    "size": 1,
                    "nodes": [{"name": "demo-master-1", "status": "READY", "public_ip": "10.0.0.10"}]
                },
                "node_groups": [{
                    "name": "node-pool",
                    "size": 2,
                    "nodes": [
                        {"name": "demo-worker-1", "status": "READY"},
                        {"name": "demo-worker-2", "status": "READY"}
                    ]
                }]
            },
            {
                "id": "c-2",
                "name": "staging",
                "type": "vsphere",
                "status": "CREATING"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let clusters = client.clusters().await.unwrap();
    assert_eq!(clusters.len(), 2);

    let demo = &clusters[0];
    assert_eq!(demo.uuid.as_deref(), Some("c-1"));
    assert_eq!(demo.master_nodes().count(), 1);
    assert_eq!(demo.worker_nodes().count(), 2);
    assert_eq!(
        demo.master_nodes().next().unwrap().public_ip.as_deref(),
        Some("10.0.0.10")
    );

    let staging = &clusters[1];
    assert_eq!(staging.status.as_deref(), Some("CREATING"));
    assert!(staging.master_node_pool.is_none());
}

#[tokio::test]
async fn test_clusters_empty() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    assert!(client.clusters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cluster_by_id() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "c-1",
            "name": "demo",
            "kubeconfig": "apiVersion: v1\nkind: Config\n"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/clusters/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let cluster = client.cluster("c-1").await.unwrap();
    assert!(cluster.kubeconfig.unwrap().starts_with("apiVersion"));

    let err = client.cluster("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot find cluster missing");
}

#[tokio::test]
async fn test_cluster_empty_id_sends_nothing() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    expect_no_requests(&mock_server).await;

    let result = client.cluster("").await;
    assert!(matches!(result, Err(CcpError::Validation(_))));
}

#[tokio::test]
async fn test_cluster_by_name() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "c-1", "name": "demo"},
            {"id": "c-2", "name": "staging"}
        ])))
        .mount(&mock_server)
        .await;

    let found = client.cluster_by_name("staging").await.unwrap();
    assert_eq!(found.uuid.as_deref(), Some("c-2"));

    let err = client.cluster_by_name("prod").await.unwrap_err();
    assert!(matches!(err, CcpError::NotFound { .. }));
    assert_eq!(err.to_string(), "Cannot find cluster prod");
}

#[tokio::test]
async fn test_create_cluster_with_defaults_demo() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/clusters/"))
        .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "6a1b7c0e-0b4f-4e8a-9d0a-2f9c1e4f5a10",
            "name": "demo",
            "status": "CREATING",
            "kubernetes_version": "1.16.3"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = client
        .create_cluster_with_defaults(demo_cluster())
        .await
        .unwrap();
    assert!(!created.uuid.unwrap().is_empty());
    assert_eq!(created.status.as_deref(), Some("CREATING"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    let expected_pool = |name: &str, size: i64, vcpus: i64, memory: i64| {
        serde_json::json!({
            "name": name,
            "size": size,
            "template": "img-1.16.3-ubuntu18",
            "vcpus": vcpus,
            "memory_mb": memory,
            "ssh_user": "u",
            "ssh_key": "k",
            "kubernetes_version": "1.16.3"
        })
    };
    assert_eq!(
        body,
        serde_json::json!({
            "name": "demo",
            "kubernetes_version": "1.16.3",
            "master_group": expected_pool("master-group", 1, 2, 16384),
            "node_groups": [expected_pool("node-pool", 2, 8, 32768)],
            "network_plugin_profile": {
                "name": "calico",
                "details": {"pod_cidr": "192.168.0.0/16"}
            }
        })
    );
}

#[tokio::test]
async fn test_create_cluster_validation_sends_nothing() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    expect_no_requests(&mock_server).await;

    let mut cluster = demo_cluster().with_defaults().unwrap();
    cluster.worker_node_pools.as_mut().unwrap()[0].ssh_key = None;

    let err = client.create_cluster(&cluster).await.unwrap_err();
    match err {
        CcpError::Validation(ValidationError::Field { field, .. }) => {
            assert_eq!(field, "node_groups[0].ssh_key");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let mut unnamed = demo_cluster();
    unnamed.name = Some(String::new());
    let result = client.create_cluster_with_defaults(unnamed).await;
    assert!(matches!(result, Err(CcpError::Validation(_))));
}

#[tokio::test]
async fn test_create_cluster_rejected_by_server() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/clusters/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"error\":\"name taken\"}"))
        .mount(&mock_server)
        .await;

    let err = client
        .create_cluster_with_defaults(demo_cluster())
        .await
        .unwrap_err();
    match err {
        CcpError::Api { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("name taken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_cluster_on_provider_looks_up_uuid() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "prov-0", "type": "aws", "name": "aws"},
            {"id": "prov-1", "type": "vsphere", "name": "vsphere"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/clusters/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "c-9", "name": "demo"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = client
        .create_cluster_on_provider(demo_cluster(), "vsphere")
        .await
        .unwrap();
    assert_eq!(created.uuid.as_deref(), Some("c-9"));

    let requests = mock_server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["provider"], "prov-1");
}

#[tokio::test]
async fn test_create_cluster_on_provider_keeps_given_uuid() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/clusters/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "c-9", "name": "demo"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cluster = Cluster {
        infra_provider_uuid: Some("prov-7".to_string()),
        ..demo_cluster()
    };
    client
        .create_cluster_on_provider(cluster, "vsphere")
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["provider"], "prov-7");
}

#[tokio::test]
async fn test_create_cluster_on_unknown_provider_sends_no_create() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client
        .create_cluster_on_provider(demo_cluster(), "vsphere")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot find provider vsphere");
}

#[tokio::test]
async fn test_scale_cluster() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("PATCH"))
        .and(path("/v3/clusters/c-1/node-pools/node-pool/"))
        .and(body_json(serde_json::json!({"name": "node-pool", "size": 5})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "node-pool", "size": 5})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let scaled = client.scale_cluster("c-1", "node-pool", 5).await.unwrap();
    assert_eq!(scaled.name.as_deref(), Some("node-pool"));
    assert_eq!(scaled.size, Some(5));
}

#[tokio::test]
async fn test_delete_cluster_empty_id_sends_nothing() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    expect_no_requests(&mock_server).await;

    let result = client.delete_cluster("").await;
    assert!(matches!(result, Err(CcpError::Validation(_))));
}

#[tokio::test]
async fn test_delete_cluster_sends_one_request() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/v3/clusters/c-1/"))
        .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client.delete_cluster("c-1").await.unwrap();
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}
