//! Router configuration for the API.
//!
//! Each process hosts one service and mounts only that service's resources,
//! plus health checks and OpenAPI docs.

use axum::{middleware, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::api_doc;
use crate::api::handlers;
use crate::api::middleware::{
    error_response_middleware, logging_middleware, request_id_middleware,
};
use crate::config::ServiceKind;
use crate::state::AppState;

fn service_routes(service: ServiceKind) -> Router<AppState> {
    match service {
        ServiceKind::Favourite => {
            Router::new().nest("/favourites", handlers::favourites::favourite_routes())
        }
        ServiceKind::Shipping => {
            Router::new().nest("/shippings", handlers::shippings::shipping_routes())
        }
        ServiceKind::Order => Router::new()
            .nest("/carts", handlers::carts::cart_routes())
            .nest("/orders", handlers::orders::order_routes()),
        ServiceKind::Payment => {
            Router::new().nest("/payments", handlers::payments::payment_routes())
        }
        ServiceKind::User => Router::new().nest("/users", handlers::users::user_routes()),
        ServiceKind::Product => Router::new()
            .nest("/categories", handlers::categories::category_routes())
            .nest("/products", handlers::products::product_routes()),
    }
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. Error response middleware - renders error bodies with the request ID
///
/// # Routes
/// - `/api/...` - resources of `state.service`
/// - `/health`, `/health/ready`, `/health/live`
/// - `/swagger-ui`, `/api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let service = state.service;

    Router::new()
        .nest("/api", service_routes(service))
        .merge(handlers::health::health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc(service)))
        .layer(middleware::from_fn(error_response_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
