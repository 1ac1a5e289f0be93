use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::{JwtConfig, JwtError};

use crate::config::Config;
use crate::middleware::{
    auth_rate_limit_middleware, metrics_handler, metrics_middleware, security_headers_middleware,
    trace_id, RateLimiterState,
};
use crate::routes::{auth, health, openapi, reservations, rooms};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    /// Fails when the configured JWT keys cannot be parsed.
    pub fn new(config: Config, pool: PgPool) -> Result<Self, JwtError> {
        let jwt = Arc::new(JwtConfig::from_rsa_pem(
            &config.jwt.private_key,
            &config.jwt.public_key,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
            config.jwt.leeway_secs,
        )?);

        let rate_limiter = RateLimiterState::new(
            config.security.auth_rate_limit_per_minute,
            config.security.trust_forwarded_for,
        )
        .map(Arc::new);

        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt,
            rate_limiter,
        })
    }
}

/// Builds the router. Fails when the configured JWT keys cannot be parsed.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    Ok(create_router(AppState::new(config, pool)?))
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Credential endpoints, limited per client IP
    let credential_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ));

    let api_routes = Router::new()
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/me", get(auth::me))
        .route("/api/habitaciones/disponibles", get(rooms::disponibles))
        .route("/api/reservas", post(reservations::create_reservation))
        .route("/api/reservas/:id/montos", get(reservations::montos));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/api/docs/openapi.yaml", get(openapi::openapi_spec))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(credential_routes)
        .merge(api_routes)
        .merge(ops_routes)
        // Global middleware (bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
