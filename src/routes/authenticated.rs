use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Endpoints for any signed-in user. Relies on the authentication layer applied in
/// `create_router`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/me
        // The caller's profile (name, email, role).
        .route("/api/me", get(handlers::get_me))
}
