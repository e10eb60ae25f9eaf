//! Route configuration and setup

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::auth_middleware;
use crate::handlers::{edit, health};
use crate::state::AppState;

/// Room for the text fields and multipart framing around the attachment
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Server-level concurrency limit
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let edit_path = state.view_url("edit.php");
    let body_limit = usize::try_from(
        state
            .config
            .max_attachment_bytes
            .saturating_add(FORM_OVERHEAD_BYTES),
    )
    .unwrap_or(usize::MAX);

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .route(&edit_path, get(edit::edit_form).post(edit::edit_submit))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new().route("/health", get(health::health_check));

    tracing::debug!(edit_path = %edit_path, body_limit, "Routes configured");

    public_routes
        .merge(protected_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
