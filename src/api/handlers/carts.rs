//! Cart request handlers, mounted by the order service.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::doc::CART_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::services::CartDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates cart routes.
///
/// Routes:
/// - GET /           - List all carts
/// - POST /          - Save a cart
/// - PUT /           - Update a cart
/// - GET /{cartId}    - Get cart by ID
/// - PUT /{cartId}    - Replace an existing cart, ID taken from the path
/// - DELETE /{cartId} - Delete cart by ID
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route(
            "/{cart_id}",
            get(find_by_id).put(update_by_id).delete(delete_by_id),
        )
}

#[utoipa::path(
    get,
    path = "/api/carts",
    responses(
        (status = 200, description = "All carts, enriched", body = [CartDto]),
        (status = 503, description = "A peer is unavailable", body = ErrorResponse)
    ),
    tag = CART_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<CartDto>>> {
    Ok(Json(state.services.carts.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/carts/{cartId}",
    params(("cartId" = i32, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart found", body = CartDto),
        (status = 404, description = "No such cart", body = ErrorResponse)
    ),
    tag = CART_TAG
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(cart_id): Path<i32>,
) -> AppResult<Json<CartDto>> {
    Ok(Json(state.services.carts.find_by_id(&cart_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    request_body = CartDto,
    responses(
        (status = 200, description = "Stored cart, enriched", body = CartDto),
        (status = 400, description = "Invalid cart", body = ErrorResponse)
    ),
    tag = CART_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CartDto>,
) -> AppResult<Json<CartDto>> {
    Ok(Json(state.services.carts.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/carts",
    request_body = CartDto,
    responses(
        (status = 200, description = "Stored cart, enriched", body = CartDto),
        (status = 404, description = "Cart must exist under the checked policy", body = ErrorResponse)
    ),
    tag = CART_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CartDto>,
) -> AppResult<Json<CartDto>> {
    Ok(Json(state.services.carts.update(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/carts/{cartId}",
    params(("cartId" = i32, Path, description = "Cart ID, overrides the body")),
    request_body = CartDto,
    responses(
        (status = 200, description = "Stored cart, enriched", body = CartDto),
        (status = 404, description = "No such cart", body = ErrorResponse)
    ),
    tag = CART_TAG
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    Path(cart_id): Path<i32>,
    ValidatedJson(mut dto): ValidatedJson<CartDto>,
) -> AppResult<Json<CartDto>> {
    dto.cart_id = cart_id;
    Ok(Json(state.services.carts.update_existing(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cartId}",
    params(("cartId" = i32, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Cart must exist under the checked policy", body = ErrorResponse)
    ),
    tag = CART_TAG
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(cart_id): Path<i32>,
) -> AppResult<Json<bool>> {
    state.services.carts.delete_by_id(&cart_id).await?;
    Ok(Json(true))
}
