//! Product request handlers, mounted by the product service.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::services::ProductDetailDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates product routes.
///
/// Routes:
/// - GET /           - List all products
/// - POST /          - Save a product
/// - PUT /           - Update a product
/// - GET /{productId}    - Get product by ID
/// - PUT /{productId}    - Replace an existing product, ID taken from the path
/// - DELETE /{productId} - Delete product by ID
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route(
            "/{product_id}",
            get(find_by_id).put(update_by_id).delete(delete_by_id),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, with their categories", body = [ProductDetailDto]),
        (status = 404, description = "A product's category is missing", body = ErrorResponse)
    ),
    tag = PRODUCT_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<ProductDetailDto>>> {
    Ok(Json(state.services.products.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{productId}",
    params(("productId" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductDetailDto),
        (status = 404, description = "No such product", body = ErrorResponse)
    ),
    tag = PRODUCT_TAG
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ProductDetailDto>> {
    Ok(Json(state.services.products.find_by_id(&product_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductDetailDto,
    responses(
        (status = 200, description = "Stored product", body = ProductDetailDto),
        (status = 400, description = "Invalid product", body = ErrorResponse)
    ),
    tag = PRODUCT_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ProductDetailDto>,
) -> AppResult<Json<ProductDetailDto>> {
    Ok(Json(state.services.products.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/products",
    request_body = ProductDetailDto,
    responses(
        (status = 200, description = "Stored product", body = ProductDetailDto),
        (status = 404, description = "Product must exist under the checked policy", body = ErrorResponse)
    ),
    tag = PRODUCT_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ProductDetailDto>,
) -> AppResult<Json<ProductDetailDto>> {
    Ok(Json(state.services.products.update(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/products/{productId}",
    params(("productId" = i32, Path, description = "Product ID, overrides the body")),
    request_body = ProductDetailDto,
    responses(
        (status = 200, description = "Stored product", body = ProductDetailDto),
        (status = 404, description = "No such product", body = ErrorResponse)
    ),
    tag = PRODUCT_TAG
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    ValidatedJson(mut dto): ValidatedJson<ProductDetailDto>,
) -> AppResult<Json<ProductDetailDto>> {
    dto.product_id = product_id;
    Ok(Json(state.services.products.update_existing(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/products/{productId}",
    params(("productId" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Product must exist under the checked policy", body = ErrorResponse)
    ),
    tag = PRODUCT_TAG
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<bool>> {
    state.services.products.delete_by_id(&product_id).await?;
    Ok(Json(true))
}
