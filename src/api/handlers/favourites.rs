//! Favourite request handlers, mounted by the favourite service.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use jiff::civil::DateTime;

use crate::api::doc::FAVOURITE_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::{AppError, AppResult};
use crate::models::FavouriteId;
use crate::services::FavouriteDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates favourite routes.
///
/// Routes:
/// - GET /                                  - List all favourites
/// - POST /                                 - Save a favourite
/// - PUT /                                  - Update a favourite
/// - GET /{userId}/{productId}/{likeDate}   - Get favourite by key
/// - DELETE /{userId}/{productId}/{likeDate} - Delete favourite by key
/// - POST /find                             - Get favourite by key in body
/// - DELETE /delete                         - Delete favourite by key in body
pub fn favourite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route("/find", post(find_by_body))
        .route("/delete", delete(delete_by_body))
        .route(
            "/{user_id}/{product_id}/{like_date}",
            get(find_by_path).delete(delete_by_path),
        )
}

fn path_key(user_id: i32, product_id: i32, like_date: &str) -> AppResult<FavouriteId> {
    let like_date = like_date
        .parse::<DateTime>()
        .map_err(|e| AppError::Validation {
            field: "likeDate".to_string(),
            reason: e.to_string(),
        })?;
    Ok(FavouriteId::new(user_id, product_id, like_date))
}

#[utoipa::path(
    get,
    path = "/api/favourites",
    responses(
        (status = 200, description = "All favourites, enriched", body = [FavouriteDto]),
        (status = 502, description = "A peer has no such entity", body = ErrorResponse),
        (status = 503, description = "A peer is unavailable", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<FavouriteDto>>> {
    Ok(Json(state.services.favourites.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/favourites/{userId}/{productId}/{likeDate}",
    params(
        ("userId" = i32, Path, description = "User who liked the product"),
        ("productId" = i32, Path, description = "Liked product"),
        ("likeDate" = String, Path, description = "When it was liked, e.g. 2024-01-15T10:30:00")
    ),
    responses(
        (status = 200, description = "Favourite found", body = FavouriteDto),
        (status = 400, description = "Malformed key", body = ErrorResponse),
        (status = 404, description = "No favourite under this key", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn find_by_path(
    State(state): State<AppState>,
    Path((user_id, product_id, like_date)): Path<(i32, i32, String)>,
) -> AppResult<Json<FavouriteDto>> {
    let key = path_key(user_id, product_id, &like_date)?;
    Ok(Json(state.services.favourites.find_by_id(&key).await?))
}

#[utoipa::path(
    post,
    path = "/api/favourites/find",
    request_body = FavouriteId,
    responses(
        (status = 200, description = "Favourite found", body = FavouriteDto),
        (status = 404, description = "No favourite under this key", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn find_by_body(
    State(state): State<AppState>,
    ValidatedJson(key): ValidatedJson<FavouriteId>,
) -> AppResult<Json<FavouriteDto>> {
    Ok(Json(state.services.favourites.find_by_id(&key).await?))
}

#[utoipa::path(
    post,
    path = "/api/favourites",
    request_body = FavouriteDto,
    responses(
        (status = 200, description = "Stored favourite, enriched", body = FavouriteDto),
        (status = 400, description = "Invalid favourite", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<FavouriteDto>,
) -> AppResult<Json<FavouriteDto>> {
    Ok(Json(state.services.favourites.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/favourites",
    request_body = FavouriteDto,
    responses(
        (status = 200, description = "Stored favourite, enriched", body = FavouriteDto),
        (status = 404, description = "Favourite must exist under the checked policy", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<FavouriteDto>,
) -> AppResult<Json<FavouriteDto>> {
    Ok(Json(state.services.favourites.update(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/favourites/{userId}/{productId}/{likeDate}",
    params(
        ("userId" = i32, Path, description = "User who liked the product"),
        ("productId" = i32, Path, description = "Liked product"),
        ("likeDate" = String, Path, description = "When it was liked, e.g. 2024-01-15T10:30:00")
    ),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Favourite must exist under the checked policy", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn delete_by_path(
    State(state): State<AppState>,
    Path((user_id, product_id, like_date)): Path<(i32, i32, String)>,
) -> AppResult<Json<bool>> {
    let key = path_key(user_id, product_id, &like_date)?;
    state.services.favourites.delete_by_id(&key).await?;
    Ok(Json(true))
}

#[utoipa::path(
    delete,
    path = "/api/favourites/delete",
    request_body = FavouriteId,
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Favourite must exist under the checked policy", body = ErrorResponse)
    ),
    tag = FAVOURITE_TAG
)]
pub async fn delete_by_body(
    State(state): State<AppState>,
    ValidatedJson(key): ValidatedJson<FavouriteId>,
) -> AppResult<Json<bool>> {
    state.services.favourites.delete_by_id(&key).await?;
    Ok(Json(true))
}
