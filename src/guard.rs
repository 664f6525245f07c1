use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::{
    AppConfig, AppState,
    auth::AuthUser,
    navigation::{Role, RouteTree},
    repository::RepositoryState,
};

/// RoleGate
///
/// Middleware state naming the route-configuration key that guards a group of API
/// routes. The gate reads the same `roles` lists the menu is rendered from.
#[derive(Clone)]
pub struct RoleGate {
    pub route_key: &'static str,
    pub state: AppState,
}

impl RoleGate {
    pub fn new(route_key: &'static str, state: AppState) -> Self {
        Self { route_key, state }
    }
}

impl FromRef<RoleGate> for RepositoryState {
    fn from_ref(gate: &RoleGate) -> RepositoryState {
        gate.state.repo.clone()
    }
}

impl FromRef<RoleGate> for AppConfig {
    fn from_ref(gate: &RoleGate) -> AppConfig {
        gate.state.config.clone()
    }
}

/// is_permitted
///
/// API-side role check for the configuration node `route_key`: admins always pass,
/// other roles must be listed. Unlike the menu, `frontendVisible` and `external`
/// play no part here. An unknown key denies everyone, admins included.
pub fn is_permitted(routes: &RouteTree, route_key: &str, role: &Role) -> bool {
    match routes.find(route_key) {
        Some(node) => role.is_admin() || node.roles().any(|allowed| allowed == role),
        None => false,
    }
}

/// require_role
///
/// Rejects the request with 403 unless the authenticated user may use the routes
/// behind `gate.route_key`. Missing or invalid credentials are rejected with 401 by
/// the `AuthUser` extractor before this runs.
pub async fn require_role(
    State(gate): State<RoleGate>,
    user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let routes = &gate.state.navigation.routes;

    if routes.find(gate.route_key).is_none() {
        tracing::error!(route = gate.route_key, "role gate references an unknown route key");
        return Err(StatusCode::FORBIDDEN);
    }

    if !is_permitted(routes, gate.route_key, &user.role) {
        tracing::info!(
            route = gate.route_key,
            user_id = %user.id,
            role = %user.role,
            "role not permitted"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
