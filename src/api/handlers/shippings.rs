//! Order item request handlers, mounted by the shipping service.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::api::doc::SHIPPING_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::models::OrderItemId;
use crate::services::OrderItemDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates order item routes.
///
/// Routes:
/// - GET /                        - List all order items
/// - POST /                       - Save an order item
/// - PUT /                        - Update an order item
/// - GET /{orderId}/{productId}    - Get order item by key
/// - DELETE /{orderId}/{productId} - Delete order item by key
/// - POST /find                   - Get order item by key in body
/// - DELETE /delete               - Delete order item by key in body
pub fn shipping_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route("/find", post(find_by_body))
        .route("/delete", delete(delete_by_body))
        .route(
            "/{order_id}/{product_id}",
            get(find_by_path).delete(delete_by_path),
        )
}

#[utoipa::path(
    get,
    path = "/api/shippings",
    responses(
        (status = 200, description = "All order items, enriched", body = [OrderItemDto]),
        (status = 503, description = "A peer is unavailable", body = ErrorResponse)
    ),
    tag = SHIPPING_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<OrderItemDto>>> {
    Ok(Json(state.services.order_items.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/shippings/{orderId}/{productId}",
    params(
        ("orderId" = i32, Path, description = "Order the line belongs to"),
        ("productId" = i32, Path, description = "Product on the line")
    ),
    responses(
        (status = 200, description = "Order item found", body = OrderItemDto),
        (status = 404, description = "No order item under this key", body = ErrorResponse)
    ),
    tag = SHIPPING_TAG
)]
pub async fn find_by_path(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<OrderItemDto>> {
    let key = OrderItemId::new(order_id, product_id);
    Ok(Json(state.services.order_items.find_by_id(&key).await?))
}

#[utoipa::path(
    post,
    path = "/api/shippings/find",
    request_body = OrderItemId,
    responses(
        (status = 200, description = "Order item found", body = OrderItemDto),
        (status = 404, description = "No order item under this key", body = ErrorResponse)
    ),
    tag = SHIPPING_TAG
)]
pub async fn find_by_body(
    State(state): State<AppState>,
    ValidatedJson(key): ValidatedJson<OrderItemId>,
) -> AppResult<Json<OrderItemDto>> {
    Ok(Json(state.services.order_items.find_by_id(&key).await?))
}

#[utoipa::path(
    post,
    path = "/api/shippings",
    request_body = OrderItemDto,
    responses(
        (status = 200, description = "Stored order item, enriched", body = OrderItemDto),
        (status = 400, description = "Invalid order item", body = ErrorResponse)
    ),
    tag = SHIPPING_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OrderItemDto>,
) -> AppResult<Json<OrderItemDto>> {
    Ok(Json(state.services.order_items.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/shippings",
    request_body = OrderItemDto,
    responses(
        (status = 200, description = "Stored order item, enriched", body = OrderItemDto),
        (status = 400, description = "Invalid order item", body = ErrorResponse)
    ),
    tag = SHIPPING_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OrderItemDto>,
) -> AppResult<Json<OrderItemDto>> {
    Ok(Json(state.services.order_items.update(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/shippings/{orderId}/{productId}",
    params(
        ("orderId" = i32, Path, description = "Order the line belongs to"),
        ("productId" = i32, Path, description = "Product on the line")
    ),
    responses(
        (status = 200, description = "Deleted", body = bool)
    ),
    tag = SHIPPING_TAG
)]
pub async fn delete_by_path(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<bool>> {
    let key = OrderItemId::new(order_id, product_id);
    state.services.order_items.delete_by_id(&key).await?;
    Ok(Json(true))
}

#[utoipa::path(
    delete,
    path = "/api/shippings/delete",
    request_body = OrderItemId,
    responses(
        (status = 200, description = "Deleted", body = bool)
    ),
    tag = SHIPPING_TAG
)]
pub async fn delete_by_body(
    State(state): State<AppState>,
    ValidatedJson(key): ValidatedJson<OrderItemId>,
) -> AppResult<Json<bool>> {
    state.services.order_items.delete_by_id(&key).await?;
    Ok(Json(true))
}
