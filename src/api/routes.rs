//! Router configuration for the API.
//!
//! Collects every handler group into one OpenAPI-aware router, serves the
//! generated document, and wraps everything in the shared middleware stack.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::ServerConfig;
use crate::state::AppState;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Outermost first:
/// 1. Request ID - generates/propagates `x-request-id`
/// 2. Logging - one span per request carrying the request ID
/// 3. Compression
/// 4. Global error handler - JSON envelope, request ID, details policy
/// 5. CORS
/// 6. Timeout - answers 408 once `request_timeout` elapses
///
/// # Routes
/// - `/api/categories`
/// - `/api/certificates` (session required)
/// - `/api/courses/{id}`
/// - `/health`, `/health/ready`, `/health/live`
/// - `/swagger-ui` and [`OPENAPI_JSON_PATH`]
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/categories", handlers::categories::category_routes())
        .nest(
            "/api/certificates",
            handlers::certificates::certificate_routes(state.clone()),
        )
        .nest("/api/courses", handlers::courses::course_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let environment = state.environment;

    router
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, api))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout),
        ))
        .layer(cors_layer(&server.allowed_origins))
        .layer(middleware::from_fn_with_state(
            environment,
            global_error_handler,
        ))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Read-only CORS policy; an empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
