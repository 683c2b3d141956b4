//! Payment request handlers, mounted by the payment service.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::doc::PAYMENT_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::services::PaymentDto;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates payment routes.
///
/// Routes:
/// - GET /              - List all payments
/// - POST /             - Save a payment
/// - PUT /              - Update a payment
/// - GET /{paymentId}    - Get payment by ID
/// - DELETE /{paymentId} - Delete payment by ID
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(save).put(update))
        .route("/{payment_id}", get(find_by_id).delete(delete_by_id))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "All payments, enriched", body = [PaymentDto]),
        (status = 503, description = "Order service unavailable", body = ErrorResponse)
    ),
    tag = PAYMENT_TAG
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<PaymentDto>>> {
    Ok(Json(state.services.payments.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/payments/{paymentId}",
    params(("paymentId" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment found", body = PaymentDto),
        (status = 404, description = "No such payment", body = ErrorResponse),
        (status = 502, description = "Order service has no such order", body = ErrorResponse)
    ),
    tag = PAYMENT_TAG
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(payment_id): Path<i32>,
) -> AppResult<Json<PaymentDto>> {
    Ok(Json(state.services.payments.find_by_id(&payment_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = PaymentDto,
    responses(
        (status = 200, description = "Stored payment, enriched", body = PaymentDto),
        (status = 400, description = "Invalid payment", body = ErrorResponse)
    ),
    tag = PAYMENT_TAG
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<PaymentDto>,
) -> AppResult<Json<PaymentDto>> {
    Ok(Json(state.services.payments.save(dto).await?))
}

#[utoipa::path(
    put,
    path = "/api/payments",
    request_body = PaymentDto,
    responses(
        (status = 200, description = "Stored payment, enriched", body = PaymentDto),
        (status = 400, description = "Invalid payment", body = ErrorResponse)
    ),
    tag = PAYMENT_TAG
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<PaymentDto>,
) -> AppResult<Json<PaymentDto>> {
    Ok(Json(state.services.payments.update(dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{paymentId}",
    params(("paymentId" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Deleted", body = bool)
    ),
    tag = PAYMENT_TAG
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(payment_id): Path<i32>,
) -> AppResult<Json<bool>> {
    state.services.payments.delete_by_id(&payment_id).await?;
    Ok(Json(true))
}
