//! HTTP server for the skeleton service.
//!
//! Provides the axum-based server exposing the REST API. The only endpoint
//! is the example healthcheck; concrete services add their own routes here.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::service::HealthService;
use crate::types::{HealthCheck, HealthStatus};

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    health_service: Arc<HealthService>,
}

impl AppState {
    pub fn new(health_service: HealthService) -> Self {
        Self {
            health_service: Arc::new(health_service),
        }
    }

    pub fn health_service(&self) -> &HealthService {
        &self.health_service
    }
}

/// Healthcheck response body. Kept separate from the domain model: the
/// wire shape should not change just because the model grows fields.
#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub id: Uuid,
    pub status: HealthStatus,
}

impl From<HealthCheck> for HealthResponse {
    fn from(check: HealthCheck) -> Self {
        Self {
            id: check.id,
            status: check.status,
        }
    }
}

/// Healthcheck endpoint.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.health_service().healthcheck().await {
        Ok(check) => (StatusCode::OK, Json(HealthResponse::from(check))).into_response(),
        Err(e) => {
            error!("healthcheck failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "healthcheck failed" })),
            )
                .into_response()
        }
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    // Permissive CORS; tighten per deployment in concrete services
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle for managing the server lifecycle.
pub struct ServerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    addr: SocketAddr,
}

impl ServerHandle {
    /// The address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal shutdown and wait for in-flight requests to drain.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }
}

/// Start the HTTP server on the specified port (0 picks a free port).
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<ServerHandle> {
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("server listening on http://{}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("server shutting down");
            })
            .await
        {
            error!("server error: {}", e);
        }
    });

    Ok(ServerHandle {
        shutdown_tx,
        task,
        addr: bound_addr,
    })
}
