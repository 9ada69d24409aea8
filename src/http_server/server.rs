//! # HTTP Server
//!
//! Main HTTP server combining the per-variant routers.
//!
//! - `/bst/*` (alias `/abb/*`) serves the plain BST store
//! - `/avl/*` serves the AVL store
//! - `/health` reports liveness

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::{BalancedStore, OrderedStore};

use super::children_routes::{children_routes, StoreState};
use super::config::HttpServerConfig;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// HTTP server for both record stores
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration and empty stores
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration and empty stores
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_stores(config, OrderedStore::ordered(), BalancedStore::balanced())
    }

    /// Create a new HTTP server around already populated stores
    pub fn with_stores(config: HttpServerConfig, bst: OrderedStore, avl: BalancedStore) -> Self {
        let router = Self::build_router(&config, bst, avl);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, bst: OrderedStore, avl: BalancedStore) -> Router {
        let bst_routes = children_routes(Arc::new(StoreState::new(bst)));
        let avl_routes = children_routes(Arc::new(StoreState::new(avl)));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/bst", bst_routes.clone())
            .nest("/abb", bst_routes)
            .nest("/avl", avl_routes)
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", local.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    // a failed handler install means no graceful stop; keep serving
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
