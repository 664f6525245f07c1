use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Unauthenticated endpoints. The navigation handlers resolve the caller as a
/// `Viewer`, so anonymous requests simply see the `unlogged` menu.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /api/navigation?expanded=a,b&collapsed=false
        // The role-filtered menu and header for the caller.
        .route("/api/navigation", get(handlers::get_navigation))
        // POST /api/navigation/dispatch
        // Resolves a click: navigate, open externally, or toggle a branch.
        .route("/api/navigation/dispatch", post(handlers::dispatch_navigation))
}
