use axum::{
    extract::{FromRef, Request},
    http::HeaderName,
    Router,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod repository;

// Routing segregated by access check (public, authenticated, role-gated, admin).
pub mod routes;
use routes::{admin, authenticated, gated, public};
use auth::AuthUser;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use navigation::{Navigation, NavigationState};
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every annotated handler, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_items, handlers::get_me, handlers::get_navigation,
        handlers::dispatch_navigation, handlers::get_navigation_report
    ),
    components(
        schemas(
            models::Item, models::ItemsResponse, models::ErrorResponse, models::UserProfile,
            models::NavigationResponse, models::DispatchRequest, models::DispatchResponse,
            models::NavigationReport, navigation::RenderEntry, navigation::NodeKind,
            navigation::IconRef, navigation::DispatchAction, navigation::HeaderModel,
            navigation::ConfigIssue, navigation::Defect,
        )
    ),
    tags(
        (name = "admin-shell", description = "Admin shell navigation and items API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container of shared services, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: database access.
    pub repo: RepositoryState,
    /// The loaded environment configuration.
    pub config: AppConfig,
    /// Route tree and icon registry, shared by the menu and the API role gate.
    pub navigation: NavigationState,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for `authenticated_routes`: the `AuthUser` extractor
/// rejects with 401 before the handler runs.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies global and scoped middleware, and
/// registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // The items API is gated by the `items` node of the route configuration.
        .merge(gated::items_routes().route_layer(middleware::from_fn_with_state(
            guard::RoleGate::new(gated::ITEMS_ROUTE_KEY, state.clone()),
            guard::require_role,
        )))
        .nest("/api/admin", admin::admin_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, uri and the `x-request-id` set above, so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
