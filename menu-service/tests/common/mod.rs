#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use menu_service::config::{
    LoggingConfig, MenuConfig, MongoConfig, StorageBackend, StorageConfig,
};
use menu_service::services::{InMemoryMenuItemRepository, MenuItemRepository, MenuItemService, MongoDb};
use menu_service::{build_router, AppState, Application};
use serde_json::{json, Value};
use service_core::config::{Config as CoreConfig, Environment};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub fn pizza() -> Value {
    json!({
        "name": "Pizza",
        "description": "Cheese pizza",
        "price": 9.99,
        "category": "Main",
        "isAvailable": true
    })
}

/// Router over the given repository, without binding a socket.
pub fn router_with(repository: Arc<dyn MenuItemRepository>, environment: Environment) -> Router {
    build_router(AppState {
        menu_items: MenuItemService::new(repository),
        environment,
    })
}

pub fn memory_router() -> Router {
    router_with(
        Arc::new(InMemoryMenuItemRepository::new()),
        Environment::Development,
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    TestResponse {
        status,
        headers,
        body,
    }
}

/// POSTs `payload` and returns the created id.
pub async fn create(router: &Router, payload: Value) -> String {
    let response = send(router, Method::POST, "/api/menuitems", Some(payload)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["id"]
        .as_str()
        .expect("Created item has no id")
        .to_string()
}

pub fn test_config(backend: StorageBackend, uri: String, database: String) -> MenuConfig {
    MenuConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        environment: Environment::Development,
        mongodb: MongoConfig { uri, database },
        storage: StorageConfig { backend },
        logging: LoggingConfig {
            level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Option<MongoDb>,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawns the service on the in-memory backend.
    pub async fn spawn_in_memory() -> Self {
        Self::spawn_with(test_config(
            StorageBackend::Memory,
            "mongodb://localhost:27017".to_string(),
            "unused".to_string(),
        ))
        .await
    }

    /// Spawns the service against `TEST_MONGODB_URI` on a throwaway database.
    pub async fn spawn_with_mongo() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("menu_test_{}", Uuid::new_v4().simple());

        Self::spawn_with(test_config(StorageBackend::MongoDb, uri, db_name)).await
    }

    async fn spawn_with(config: MenuConfig) -> Self {
        let db_name = config.mongodb.database.clone();
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().cloned();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Drops the test database, if any.
    pub async fn cleanup(&self) {
        if let Some(db) = &self.db {
            let _ = db.client().database(&self.db_name).drop(None).await;
        }
    }
}
