use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::Settings;
use database::DbRepository;
use ledger::Ledger;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod handlers;

pub use auth::{AuthError, CurrentUser, TokenSigner};

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Ledger,
    pub signer: TokenSigner,
}

/// Builds the application router. Every `/financial` route requires a bearer token.
pub fn app(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    let company_routes = Router::new()
        .route(
            "/companies",
            get(handlers::list_companies).post(handlers::create_company),
        )
        .route(
            "/companies/:company_id",
            get(handlers::get_company).delete(handlers::delete_company),
        )
        .route(
            "/companies/:company_id/financial-data",
            get(handlers::list_financial_data).post(handlers::submit_financial_data),
        )
        .route(
            "/companies/:company_id/financial-data/:fiscal_year",
            get(handlers::get_financial_data)
                .put(handlers::update_financial_data)
                .delete(handlers::delete_financial_data),
        )
        .route("/companies/:company_id/dashboard", get(handlers::get_dashboard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/financial", company_routes)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: &Settings, addr: SocketAddr) -> anyhow::Result<()> {
    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;

    let state = Arc::new(AppState {
        ledger: Ledger::new(Arc::new(DbRepository::new(db_pool))),
        signer: TokenSigner::from_settings(&settings.auth)?,
    });
    let app = app(state, settings.server.body_limit_bytes);

    tracing::info!(%addr, api_version = %settings.api_version, "Web server started and listening.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
