use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use siparhanud_backend::{
    config::Config,
    db::connection::create_pool,
    docs::ApiDoc,
    handlers,
    middleware as app_middleware,
    services::audit_log::{AuditLogService, AuditLogServiceTrait},
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siparhanud_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_expiration_hours = config.jwt_expiration_hours,
        bind_addr = %config.bind_addr,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(pool.clone(), config.clone());
    let audit_service: Arc<dyn AuditLogServiceTrait> = Arc::new(AuditLogService::new(pool));

    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/init/setup", post(handlers::setup::init_setup))
        .route("/api/reference/ranks", get(handlers::reference::list_ranks));

    // Routes for any authenticated user
    let user_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/auth/change-password",
            put(handlers::auth::change_password),
        )
        .route("/api/personnel", get(handlers::personnel::list_personnel))
        .route(
            "/api/personnel/{personnel_id}",
            get(handlers::personnel::get_personnel),
        )
        .route(
            "/api/personnel/{personnel_id}/rank-history",
            get(handlers::service_records::list_rank_history),
        )
        .route(
            "/api/personnel/{personnel_id}/position-history",
            get(handlers::service_records::list_position_history),
        )
        .route(
            "/api/personnel/{personnel_id}/education",
            get(handlers::service_records::list_education_records),
        )
        .route(
            "/api/personnel/{personnel_id}/family",
            get(handlers::service_records::list_family_members),
        )
        .route("/api/requests", post(handlers::requests::submit_request))
        .route("/api/requests", get(handlers::requests::list_requests))
        .route(
            "/api/requests/{request_id}",
            get(handlers::requests::get_request),
        )
        .route(
            "/api/dashboard/stats",
            get(handlers::dashboard::get_dashboard_stats),
        )
        .route("/api/reference/units", get(handlers::reference::list_units))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth,
        ));

    // Personnel-record writes (staff/admin)
    let staff_routes = Router::new()
        .route(
            "/api/personnel",
            post(handlers::personnel::create_personnel),
        )
        .route(
            "/api/personnel/{personnel_id}",
            put(handlers::personnel::update_personnel),
        )
        .route(
            "/api/personnel/{personnel_id}/rank-history",
            post(handlers::service_records::create_rank_history),
        )
        .route(
            "/api/personnel/{personnel_id}/position-history",
            post(handlers::service_records::create_position_history),
        )
        .route(
            "/api/personnel/{personnel_id}/education",
            post(handlers::service_records::create_education_record),
        )
        .route(
            "/api/personnel/{personnel_id}/family",
            post(handlers::service_records::create_family_member),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth_personnel_write,
        ));

    // Verification decisions (verifier role)
    let verifier_routes = Router::new()
        .route(
            "/api/requests/{request_id}/verify",
            put(handlers::verification::verify_request),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth_verifier,
        ));

    // Account management (admin)
    let admin_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::deactivate_user),
        )
        .route(
            "/api/users/{user_id}/reset-password",
            post(handlers::users::reset_password),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth_user_manage,
        ));

    // Audit trail (admin/leader)
    let audit_routes = Router::new()
        .route(
            "/api/audit-logs",
            get(handlers::audit_logs::list_audit_logs),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth_audit_read,
        ));

    // Reports (admin/staff/leader)
    let report_routes = Router::new()
        .route(
            "/api/reports/personnel",
            get(handlers::reports::personnel_report),
        )
        .route(
            "/api/reports/requests",
            get(handlers::reports::requests_report),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth_report_read,
        ));

    // Compose app with shared layers (CORS/Trace/Audit) and shared state
    let app = Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(user_routes)
        .merge(staff_routes)
        .merge(verifier_routes)
        .merge(admin_routes)
        .merge(audit_routes)
        .merge(report_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                )
                .layer(Extension(audit_service))
                .layer(axum_middleware::from_fn(
                    app_middleware::audit_log::audit_log,
                )),
        )
        .with_state(state);

    // Start server
    let addr = config.bind_addr;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
