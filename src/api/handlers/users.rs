//! User request handlers, mounted by the user service.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::doc::USER_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::services::UserDetailDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates user routes.
///
/// Routes:
/// - GET /           - List all users
/// - POST /          - Save a user
/// - PUT /           - Update a user
/// - GET /{userId}    - Get user by ID
/// - PUT /{userId}    - Replace an existing user, ID taken from the path
/// - DELETE /{userId} - Delete user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route(
            "/{user_id}",
            get(find_by_id).put(update_by_id).delete(delete_by_id),
        )
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [UserDetailDto])
    ),
    tag = USER_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<UserDetailDto>>> {
    Ok(Json(state.services.users.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{userId}",
    params(("userId" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDetailDto),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<UserDetailDto>> {
    Ok(Json(state.services.users.find_by_id(&user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserDetailDto,
    responses(
        (status = 200, description = "Stored user", body = UserDetailDto),
        (status = 400, description = "Invalid user", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UserDetailDto>,
) -> AppResult<Json<UserDetailDto>> {
    Ok(Json(state.services.users.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/users",
    request_body = UserDetailDto,
    responses(
        (status = 200, description = "Stored user", body = UserDetailDto),
        (status = 404, description = "User must exist under the checked policy", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UserDetailDto>,
) -> AppResult<Json<UserDetailDto>> {
    Ok(Json(state.services.users.update(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{userId}",
    params(("userId" = i32, Path, description = "User ID, overrides the body")),
    request_body = UserDetailDto,
    responses(
        (status = 200, description = "Stored user", body = UserDetailDto),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    ValidatedJson(mut dto): ValidatedJson<UserDetailDto>,
) -> AppResult<Json<UserDetailDto>> {
    dto.user_id = user_id;
    Ok(Json(state.services.users.update_existing(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/{userId}",
    params(("userId" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "User must exist under the checked policy", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<bool>> {
    state.services.users.delete_by_id(&user_id).await?;
    Ok(Json(true))
}
