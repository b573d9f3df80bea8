use super::super::{TEST_TOKEN, create_authenticated_client};
use crate::{AUTH_TOKEN_HEADER, AddonKind, CcpError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, header, method, path},
};

fn catalogue_body() -> serde_json::Value {
    serde_json::json!({
        "ccp-monitor": {
            "name": "ccp-monitor",
            "displayName": "Monitoring",
            "description": "Prometheus and Grafana",
            "url": "/opt/ccp/charts/ccp-monitor.tgz",
            "namespace": "ccp"
        },
        "kubernetes-dashboard": {
            "name": "kubernetes-dashboard",
            "displayName": "Dashboard",
            "url": "/opt/ccp/charts/kubernetes-dashboard.tgz"
        }
    })
}

#[tokio::test]
async fn test_addon_catalogue() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters/c-1/catalog"))
        .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalogue_body()))
        .mount(&mock_server)
        .await;

    let catalogue = client.addon_catalogue("c-1").await.unwrap();
    assert_eq!(catalogue.len(), 2);
    assert!(AddonKind::Dashboard.entry(&catalogue).is_some());
    assert!(AddonKind::Kubeflow.entry(&catalogue).is_none());
}

#[tokio::test]
async fn test_installed_addons() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters/c-1/addons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "name": "ccp-monitor",
                "displayName": "Monitoring",
                "addon_status": {"status": "INSTALLED", "helm_status": "DEPLOYED"}
            }]
        })))
        .mount(&mock_server)
        .await;

    let installed = client.installed_addons("c-1").await.unwrap();
    assert_eq!(installed.count, 1);
    let status = installed.results[0].status.as_ref().unwrap();
    assert_eq!(status.helm_status.as_deref(), Some("DEPLOYED"));
}

#[tokio::test]
async fn test_installed_addons_empty() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v3/clusters/c-1/addons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let installed = client.installed_addons("c-1").await.unwrap();
    assert_eq!(installed.count, 0);
    assert!(installed.results.is_empty());
}

#[tokio::test]
async fn test_install_addon_posts_catalogue_entry() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    let catalogue: crate::AddonCatalogue = serde_json::from_value(catalogue_body()).unwrap();
    let entry = AddonKind::Monitoring.entry(&catalogue).unwrap();

    Mock::given(method("POST"))
        .and(path("/v3/clusters/c-1/addons/"))
        .and(body_json(serde_json::json!({
            "name": "ccp-monitor",
            "displayName": "Monitoring",
            "description": "Prometheus and Grafana",
            "url": "/opt/ccp/charts/ccp-monitor.tgz",
            "namespace": "ccp"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    client.install_addon("c-1", entry).await.unwrap();
}

#[tokio::test]
async fn test_delete_addon() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/v3/clusters/c-1/addons/ccp-monitor/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client.delete_addon("c-1", "ccp-monitor").await.unwrap();
}

#[tokio::test]
async fn test_addon_calls_validate_ids() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    assert!(matches!(
        client.addon_catalogue("").await,
        Err(CcpError::Validation(_))
    ));
    assert!(matches!(
        client.delete_addon("c-1", "").await,
        Err(CcpError::Validation(_))
    ));
}
