//! Vitae web client library.
//!
//! Server-rendered front end for the résumé backend: session-based
//! authentication, the résumé editor, and themed PDF export, all rendered
//! with Askama templates. Exposed as a library so the router can be driven
//! directly in integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the full application router.
///
/// Layer order matters: the session layer must sit outside the expiry
/// middleware so the session is available when a 401 response is handled.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_expiry,
        ))
        .layer(middleware::create_session_layer(state.config()))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}
