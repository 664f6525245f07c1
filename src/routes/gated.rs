use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Route-configuration key guarding the items API.
pub const ITEMS_ROUTE_KEY: &str = "items";

/// Gated Router Module
///
/// The items endpoints. `create_router` wraps this router in
/// `guard::require_role(ITEMS_ROUTE_KEY)`, so the roles listed for the `items`
/// menu entry are exactly the roles allowed to call the API.
pub fn items_routes() -> Router<AppState> {
    Router::new()
        // GET /api/items
        .route("/api/items", get(handlers::get_items))
}
