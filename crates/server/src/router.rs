//! HTTP surface of the gate.
//!
//! Routes:
//! - `GET  /api`              initial frame (Prompt)
//! - `POST /api`              frame action, answered with the next frame
//! - `GET  /api/image/:view`  SVG image for a view
//! - `GET  /api/health`       liveness
//! - `GET  /api/dev`          preview page (development mode only)
//! - `/public/*`              static assets (development mode only)

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path as UrlPath, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::{GateConfig, Mode};
use crate::frame::FrameActionPayload;
use crate::gate::GateHandler;
use crate::views::{View, ViewContext, render_frame, render_image, render_preview};

// ============================================================================
// App State
// ============================================================================

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<GateHandler>,
    pub views: Arc<ViewContext>,
}

impl AppState {
    pub fn new(gate: GateHandler, views: ViewContext) -> Self {
        Self {
            gate: Arc::new(gate),
            views: Arc::new(views),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the router. Development mode adds the preview page and asset serving.
pub fn create_router(state: AppState, mode: Mode, assets_dir: &Path) -> Router {
    let mut router = Router::new()
        .route("/api", get(initial_frame).post(frame_action))
        .route("/api/image/:view", get(view_image))
        .route("/api/health", get(health));

    if mode.is_development() {
        router = router
            .route("/api/dev", get(dev_preview))
            .nest_service("/public", ServeDir::new(assets_dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: GateConfig) -> Result<()> {
    let gate = GateHandler::from_config(&config)?;
    let views = ViewContext::from_config(&config).context("Failed to build view URLs")?;
    let router = create_router(AppState::new(gate, views), config.mode, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!(
        "Frame gate listening on {} ({} mode, public URL {})",
        config.listen_addr, config.mode, config.public_url
    );
    if config.mode.is_development() {
        info!("Preview: {}api/dev", config.public_url);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Frame gate stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn initial_frame(State(state): State<AppState>) -> Html<String> {
    Html(render_frame(View::Prompt, &state.views))
}

async fn frame_action(State(state): State<AppState>, body: Bytes) -> Html<String> {
    // Clients differ in content type, so parse the raw body
    let payload = match serde_json::from_slice::<FrameActionPayload>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Unreadable frame action body: {}", e);
            FrameActionPayload::default()
        }
    };

    let previous_action = payload.previous_action();
    let actor = payload.actor();
    debug!(
        "Frame action: button={:?} action={:?} fid={:?}",
        payload.untrusted_data.button_index, previous_action, actor
    );

    let view = state.gate.render(previous_action.as_deref(), actor).await;
    Html(render_frame(view, &state.views))
}

async fn view_image(State(state): State<AppState>, UrlPath(name): UrlPath<String>) -> Response {
    match View::from_name(&name) {
        Some(view) => (
            [
                (header::CONTENT_TYPE, "image/svg+xml"),
                (header::CACHE_CONTROL, "public, max-age=300"),
            ],
            render_image(view, &state.views),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, format!("Unknown view: {}", name)).into_response(),
    }
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let checker = state.gate.checker();
    Json(json!({
        "status": "ok",
        "provider": checker.provider_name(),
        "cast": checker.target().as_str(),
        "requirements": checker
            .requirements()
            .kinds()
            .iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<_>>(),
    }))
}

async fn dev_preview(State(state): State<AppState>) -> Html<String> {
    Html(render_preview(&state.views))
}
