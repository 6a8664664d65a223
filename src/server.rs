use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value as JsonValue;
use tokio::net::TcpListener;

use crate::dashboard::Dashboard;

// ---------------------------------------------------------------------------
// Shared state: the pre-rendered page
// ---------------------------------------------------------------------------

/// Immutable responses rendered once at startup.
#[derive(Debug)]
pub struct AppState {
    page: String,
    figures: JsonValue,
}

impl AppState {
    pub fn new(dashboard: &Dashboard) -> Result<Self> {
        Ok(AppState {
            page: dashboard.render_page()?,
            figures: dashboard.figures_json()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes: `/` (HTML page), `/figures.json` (chart payloads), `/health`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/figures.json", get(figures))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn figures(State(state): State<Arc<AppState>>) -> Json<JsonValue> {
    Json(state.figures.clone())
}

async fn health() -> &'static str {
    "ok"
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    let local = listener.local_addr().context("reading bound address")?;
    log::info!("Dashboard available at http://{local}/");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
