mod common;

use axum::http::{Method, StatusCode};
use common::{send, TestApp};
use menu_service::services::init_metrics;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn_in_memory().await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "menu-service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_check_does_not_need_the_database() {
    // Nothing listens on this port; liveness must still succeed
    let config = common::test_config(
        menu_service::config::StorageBackend::MongoDb,
        "mongodb://127.0.0.1:1".to_string(),
        "unreachable".to_string(),
    );
    let app = menu_service::Application::build(config)
        .await
        .expect("Client creation is lazy");
    let port = app.port();
    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    let mut status = None;
    for _ in 0..50 {
        if let Ok(response) = client.get(&url).send().await {
            status = Some(response.status());
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    assert_eq!(status, Some(reqwest::StatusCode::OK));
}

#[tokio::test]
async fn metrics_endpoint_reports_http_requests_by_route() {
    init_metrics().expect("Failed to install metrics recorder");
    let router = common::memory_router();

    let response = send(&router, Method::GET, "/api/menuitems/abc", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = send(&router, Method::GET, "/metrics", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("text/plain"));

    let body = String::from_utf8(response.body.to_vec()).expect("Metrics are not UTF-8");
    let request_counts: Vec<&str> = body
        .lines()
        .filter(|line| line.starts_with("http_requests_total{"))
        .collect();
    assert!(
        request_counts
            .iter()
            .any(|line| line.contains(r#"path="/api/menuitems/:id""#) && line.contains(r#"status="404""#)),
        "missing per-route counter in:\n{}",
        body
    );
    assert!(body.contains("http_request_duration_seconds"));
}
