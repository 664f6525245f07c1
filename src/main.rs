use admin_shell::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    navigation::{IconRegistry, Navigation, RouteTree},
    repository::{PostgresRepository, RepositoryState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Startup order: configuration, logging, route configuration, database, HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production secrets).
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise crate-level debug.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "admin_shell=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Route configuration, shared by the menu and the API role gate.
    let routes = RouteTree::load(&config.routes_config)
        .expect("FATAL: Failed to load the route configuration. Check ROUTES_CONFIG.");
    let issues = routes.audit();
    for issue in &issues {
        tracing::warn!(route = %issue.id, defect = %issue.defect, "misconfigured route");
    }
    tracing::info!(
        path = %config.routes_config,
        nodes = routes.node_count(),
        issues = issues.len(),
        "route configuration loaded"
    );
    let navigation = Arc::new(Navigation::new(routes, IconRegistry::builtin()));

    // 4. Database.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");
    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 5. Router and server.
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState {
        repo,
        config,
        navigation,
    });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server terminated");
    }
}
