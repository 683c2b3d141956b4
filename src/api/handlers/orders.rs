//! Order request handlers, mounted by the order service.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::doc::ORDER_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::services::OrderDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates order routes.
///
/// Routes:
/// - GET /           - List all orders
/// - POST /          - Save an order
/// - PUT /           - Update an order
/// - GET /{orderId}    - Get order by ID
/// - PUT /{orderId}    - Replace an existing order, ID taken from the path
/// - DELETE /{orderId} - Delete order by ID
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route(
            "/{order_id}",
            get(find_by_id).put(update_by_id).delete(delete_by_id),
        )
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders, with their carts", body = [OrderDto]),
        (status = 404, description = "An order's cart is missing", body = ErrorResponse)
    ),
    tag = ORDER_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<OrderDto>>> {
    Ok(Json(state.services.orders.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{orderId}",
    params(("orderId" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderDto),
        (status = 404, description = "No such order, or its cart is missing", body = ErrorResponse)
    ),
    tag = ORDER_TAG
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Json<OrderDto>> {
    Ok(Json(state.services.orders.find_by_id(&order_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderDto,
    responses(
        (status = 200, description = "Stored order, with its cart", body = OrderDto),
        (status = 400, description = "Invalid order", body = ErrorResponse)
    ),
    tag = ORDER_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OrderDto>,
) -> AppResult<Json<OrderDto>> {
    Ok(Json(state.services.orders.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/orders",
    request_body = OrderDto,
    responses(
        (status = 200, description = "Stored order, with its cart", body = OrderDto),
        (status = 404, description = "Order must exist under the checked policy", body = ErrorResponse)
    ),
    tag = ORDER_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OrderDto>,
) -> AppResult<Json<OrderDto>> {
    Ok(Json(state.services.orders.update(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/orders/{orderId}",
    params(("orderId" = i32, Path, description = "Order ID, overrides the body")),
    request_body = OrderDto,
    responses(
        (status = 200, description = "Stored order, with its cart", body = OrderDto),
        (status = 404, description = "No such order", body = ErrorResponse)
    ),
    tag = ORDER_TAG
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    ValidatedJson(mut dto): ValidatedJson<OrderDto>,
) -> AppResult<Json<OrderDto>> {
    dto.order_id = order_id;
    Ok(Json(state.services.orders.update_existing(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{orderId}",
    params(("orderId" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Order must exist under the checked policy", body = ErrorResponse)
    ),
    tag = ORDER_TAG
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Json<bool>> {
    state.services.orders.delete_by_id(&order_id).await?;
    Ok(Json(true))
}
