//! Category request handlers, mounted by the product service.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::services::CategoryDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates category routes.
///
/// Routes:
/// - GET /           - List all categories
/// - POST /          - Save a category
/// - PUT /           - Update a category
/// - GET /{categoryId}    - Get category by ID
/// - PUT /{categoryId}    - Replace an existing category, ID taken from the path
/// - DELETE /{categoryId} - Delete category by ID
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route(
            "/{category_id}",
            get(find_by_id).put(update_by_id).delete(delete_by_id),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryDto])
    ),
    tag = CATEGORY_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryDto>>> {
    Ok(Json(state.services.categories.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/categories/{categoryId}",
    params(("categoryId" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "No such category", body = ErrorResponse)
    ),
    tag = CATEGORY_TAG
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> AppResult<Json<CategoryDto>> {
    Ok(Json(state.services.categories.find_by_id(&category_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Stored category", body = CategoryDto),
        (status = 400, description = "Invalid category", body = ErrorResponse)
    ),
    tag = CATEGORY_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> AppResult<Json<CategoryDto>> {
    Ok(Json(state.services.categories.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/categories",
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Stored category", body = CategoryDto),
        (status = 404, description = "Category must exist under the checked policy", body = ErrorResponse)
    ),
    tag = CATEGORY_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> AppResult<Json<CategoryDto>> {
    Ok(Json(state.services.categories.update(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/categories/{categoryId}",
    params(("categoryId" = i32, Path, description = "Category ID, overrides the body")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Stored category", body = CategoryDto),
        (status = 404, description = "No such category", body = ErrorResponse)
    ),
    tag = CATEGORY_TAG
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    ValidatedJson(mut dto): ValidatedJson<CategoryDto>,
) -> AppResult<Json<CategoryDto>> {
    dto.category_id = category_id;
    Ok(Json(state.services.categories.update_existing(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{categoryId}",
    params(("categoryId" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Category must exist under the checked policy", body = ErrorResponse)
    ),
    tag = CATEGORY_TAG
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> AppResult<Json<bool>> {
    state.services.categories.delete_by_id(&category_id).await?;
    Ok(Json(true))
}
