use crate::config::{MenuConfig, StorageBackend};
use crate::handlers::{self, menu_items, MENU_ITEMS_PATH};
use crate::services::{
    InMemoryMenuItemRepository, MenuItemRepository, MenuItemService, MongoDb,
    MongoMenuItemRepository,
};
use axum::{
    body::Body,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use service_core::config::Environment;
use service_core::error::AppError;
use service_core::middleware::{
    error_handling::{error_handling_middleware, PanicResponder},
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub menu_items: MenuItemService,
    pub environment: Environment,
}

/// Routes plus the middleware stack. Layers added later run first, so the
/// request id is assigned before the trace span opens and panics are caught
/// closest to the handlers.
pub fn build_router(state: AppState) -> Router {
    let environment = state.environment;
    let item_path = format!("{}/:id", MENU_ITEMS_PATH);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            MENU_ITEMS_PATH,
            get(menu_items::list_menu_items).post(menu_items::create_menu_item),
        )
        .route(
            &item_path,
            get(menu_items::get_menu_item)
                .put(menu_items::update_menu_item)
                .delete(menu_items::delete_menu_item),
        )
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(PanicResponder::new(environment)))
        .layer(from_fn_with_state(environment, error_handling_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>,
    db: Option<MongoDb>,
}

impl Application {
    pub async fn build(config: MenuConfig) -> Result<Self, AppError> {
        let (repository, db): (Arc<dyn MenuItemRepository>, Option<MongoDb>) =
            match config.storage.backend {
                StorageBackend::MongoDb => {
                    let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
                        .await
                        .map_err(|e| {
                            tracing::error!("Failed to create MongoDB client: {}", e);
                            e
                        })?;
                    (Arc::new(MongoMenuItemRepository::new(&db)), Some(db))
                }
                StorageBackend::Memory => {
                    tracing::warn!("Using in-memory storage; data is lost on restart");
                    (Arc::new(InMemoryMenuItemRepository::new()), None)
                }
            };

        let state = AppState {
            menu_items: MenuItemService::new(repository),
            environment: config.environment,
        };
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
            db,
        })
    }

    /// `None` when running on the in-memory backend.
    pub fn db(&self) -> Option<&MongoDb> {
        self.db.as_ref()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
