use crate::{
    AppState,
    auth::{AuthUser, Viewer},
    models::{
        DispatchRequest, DispatchResponse, ErrorResponse, ItemsResponse, NavigationReport,
        NavigationResponse, UserProfile,
    },
    navigation::{ExpansionState, HeaderModel, NavError, dispatch, render},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

// --- Query Structs ---

/// NavigationQuery
///
/// Client-held view state for `GET /api/navigation`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct NavigationQuery {
    /// Comma-separated keys of the expanded menu entries.
    pub expanded: Option<String>,
    /// Whether the sidebar is collapsed to icons only.
    pub collapsed: Option<bool>,
}

impl NavigationQuery {
    fn expansion(&self) -> ExpansionState {
        self.expanded
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .collect()
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

// --- Handlers ---

/// get_items
///
/// [Role-gated Route] Lists every item. Access is decided by the `items` node of
/// the route configuration (see `guard::require_role`).
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "Items", body = ItemsResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Role not permitted"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_items(State(state): State<AppState>) -> Result<Json<ItemsResponse>, ApiError> {
    match state.repo.get_items().await {
        Ok(data) => Ok(Json(ItemsResponse {
            message: "Data fetched successfully".to_string(),
            data,
        })),
        Err(e) => {
            tracing::error!(error = %e, "error fetching items");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        }
    }
}

/// get_me
///
/// [Authenticated Route] The caller's profile.
#[utoipa::path(
    get,
    path = "/api/me",
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_me(user: AuthUser) -> Json<UserProfile> {
    Json(UserProfile {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role.to_string(),
    })
}

/// get_navigation
///
/// [Public Route] The menu and header as the current viewer sees them. Anonymous
/// callers get the `unlogged` view.
#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses((status = 200, description = "Menu", body = NavigationResponse))
)]
pub async fn get_navigation(
    viewer: Viewer,
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationResponse> {
    let navigation = &state.navigation;
    let expansion = query.expansion();
    let menu = render(&navigation.routes.routes, &viewer.role, &expansion, &navigation.icons);

    Json(NavigationResponse {
        app_name: state.config.app_name.clone(),
        role: viewer.role.to_string(),
        header: HeaderModel::for_viewer(&viewer.role, viewer.user.as_ref()),
        show_labels: !query.collapsed.unwrap_or(false),
        entries: menu.entries,
    })
}

/// dispatch_navigation
///
/// [Public Route] Resolves a click on a menu entry. Composite entries toggle and
/// the new expansion state is returned; leaves return the navigation the client
/// must perform. Entries the viewer cannot see are reported as missing.
#[utoipa::path(
    post,
    path = "/api/navigation/dispatch",
    request_body = DispatchRequest,
    responses(
        (status = 200, description = "Action", body = DispatchResponse),
        (status = 404, description = "No such visible entry", body = ErrorResponse),
        (status = 422, description = "Entry misconfigured", body = ErrorResponse)
    )
)]
pub async fn dispatch_navigation(
    viewer: Viewer,
    State(state): State<AppState>,
    Json(payload): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let node = state
        .navigation
        .routes
        .resolve_visible(&payload.id, &viewer.role)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("no route `{}`", payload.id)))?;

    let key = payload.id.rsplit('/').next().unwrap_or(&payload.id);
    let mut expansion: ExpansionState = payload.expanded.iter().map(String::as_str).collect();

    match dispatch(key, node, &mut expansion) {
        Ok(action) => Ok(Json(DispatchResponse {
            action,
            expanded: expansion.expanded_keys(),
        })),
        Err(e @ NavError::Misconfigured { .. }) => {
            tracing::warn!(route = %payload.id, error = %e, "dispatch on misconfigured route");
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
        Err(e) => Err(api_error(StatusCode::NOT_FOUND, e.to_string())),
    }
}

/// get_navigation_report
///
/// [Admin Route] Audit of the loaded route configuration.
///
/// *Authorization*: Explicitly checks that the role resolved by `AuthUser` is "admin".
#[utoipa::path(
    get,
    path = "/api/admin/navigation",
    responses(
        (status = 200, description = "Audit", body = NavigationReport),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn get_navigation_report(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<NavigationReport>, StatusCode> {
    if !role.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }
    let routes = &state.navigation.routes;
    Ok(Json(NavigationReport {
        node_count: routes.node_count(),
        issues: routes.audit(),
    }))
}
