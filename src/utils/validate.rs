use crate::error::{AppError, AppResult};
use axum::extract::{rejection::JsonRejection, FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed its `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct LineBody {
        #[validate(range(min = 1, message = "orderId must be positive"))]
        order_id: i32,
        #[validate(range(min = 1, message = "quantity must be positive"))]
        quantity: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let result =
            ValidatedJson::<LineBody>::from_request(json_request(r#"{"orderId":3,"quantity":2}"#), &())
                .await;

        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.order_id, 3);
        assert_eq!(body.quantity, 2);
    }

    #[tokio::test]
    async fn test_rule_violation_names_the_field() {
        let result =
            ValidatedJson::<LineBody>::from_request(json_request(r#"{"orderId":3,"quantity":0}"#), &())
                .await;

        match result.unwrap_err() {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "quantity");
                assert_eq!(reason, "quantity must be positive");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_field_in_name_order_is_reported() {
        let result =
            ValidatedJson::<LineBody>::from_request(json_request(r#"{"orderId":0,"quantity":0}"#), &())
                .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { field, .. } if field == "order_id"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result =
            ValidatedJson::<LineBody>::from_request(json_request(r#"{"orderId":"#), &()).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let result =
            ValidatedJson::<LineBody>::from_request(json_request(r#"{"orderId":3}"#), &()).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }
}
