use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Mounted under `/api/admin`. The 'admin' role is checked inside each handler
/// after the request passes the authentication layer.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/admin/navigation
        // Audit of the loaded route configuration: node count and misconfigured nodes.
        .route("/navigation", get(handlers::get_navigation_report))
}
