//! HTTP server setup.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Render the dashboard from the current snapshot
//! - Serve static assets (embedded or from a directory)
//! - Wire up middleware (tracing, timeout, request ID)
//! - Graceful shutdown on the coordinator's signal

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::observability::metrics;
use crate::reload::ConfigStore;
use crate::template::{EMBEDDED_CSS, EMBEDDED_JS};

/// HTTP-side settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Serve `/static` from this directory instead of the embedded assets.
    pub static_dir: Option<PathBuf>,
    /// Per-request deadline.
    pub request_timeout: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            static_dir: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
}

/// HTTP server for the dashboard.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading from `store`.
    pub fn new(store: Arc<ConfigStore>, settings: &ServerSettings) -> Self {
        let router = Self::build_router(AppState { store }, settings);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(state: AppState, settings: &ServerSettings) -> Router {
        let router: Router<AppState> = Router::new()
            .route(
                "/",
                get(index_handler).layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache"),
                )),
            )
            .route("/health", get(health_handler));

        let router = match &settings.static_dir {
            Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
            None => router
                .route("/static/css/apps.css", get(css_handler))
                .route("/static/js/apps.js", get(js_handler)),
        };

        router
            .with_state(state)
            .layer(TimeoutLayer::new(settings.request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Get the router, e.g. to drive it without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then stop accepting and let
    /// in-flight requests finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Render the dashboard from one snapshot.
async fn index_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.store.read();

    match snapshot.template.render(&snapshot.config) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(
                error = %e,
                version = snapshot.version,
                template = snapshot.template.origin(),
                "Error executing template"
            );
            metrics::record_render_failure();
            (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering template").into_response()
        }
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub config_version: u64,
    /// Unix seconds at which the current snapshot was published.
    pub published_at: u64,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let snapshot = state.store.read();
    let published_at = snapshot
        .published_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Json(HealthStatus {
        status: "ok",
        config_version: snapshot.version,
        published_at,
    })
}

async fn css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], EMBEDDED_CSS)
}

async fn js_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], EMBEDDED_JS)
}
