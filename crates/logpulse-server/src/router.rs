//! API router setup

use crate::handlers::{self, AppState};
use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Prefix every control route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Routes polled by dashboards; request logging skips them.
const QUIET_PATHS: [&str; 2] = ["/api/v1/health", "/api/v1/logs/status"];

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Create the API router
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let logs = Router::new()
        .route("/start", post(handlers::start_generation))
        .route("/stop", post(handlers::stop_generation))
        .route("/rate", put(handlers::update_rate))
        .route("/status", get(handlers::get_status));

    let api = Router::new()
        .nest("/logs", logs)
        .route("/health", get(handlers::health));

    Router::new()
        .nest(API_PREFIX, api)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if QUIET_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let started = Instant::now();
    let response = next.run(request).await;

    info!(
        target: "logpulse::http",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_secs_f64() * 1000.0,
        "request"
    );
    response
}
