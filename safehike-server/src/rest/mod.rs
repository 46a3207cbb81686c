mod runtime;
mod session;

pub use runtime::RunRequest;
pub use session::CreateSessionRequest;

use crate::ServerConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the CORS layer based on the security configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.security.allowed_origins.is_empty() {
        // Development mode: allow all origins.
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> = config
            .security
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Create the server application.
pub fn create_app(config: ServerConfig) -> Router {
    let cors_layer = build_cors_layer(&config);
    let request_timeout = config.security.request_timeout;
    let max_body_size = config.security.max_body_size;

    let api_router = Router::new()
        .route("/health", get(health_check))
        .route("/sessions", post(session::create_session))
        .route(
            "/sessions/{user_id}/{session_id}",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/run/{user_id}/{session_id}", post(runtime::run_sse))
        .with_state(config);

    Router::new().nest("/api", api_router).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(DefaultBodyLimit::max(max_body_size))
            .layer(cors_layer),
    )
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}
