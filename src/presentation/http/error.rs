use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::ports::token_codec::TokenError;
use crate::domain::accounts::error::AccountError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Any handler failure. Rendered as `400 {"error": <message>}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Decode(String),
    #[error("invalid account ID: {0}")]
    InvalidAccountId(String),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Decode(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Account(AccountError::Store(e)) => {
                tracing::error!(error = ?e, "account_store_failure");
            }
            other => tracing::debug!(error = %other, "request_rejected"),
        }
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn parse_account_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidAccountId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids_only() {
        assert_eq!(parse_account_id("42").unwrap(), 42);
        let err = parse_account_id("abc").unwrap_err();
        assert_eq!(err.to_string(), "invalid account ID: abc");
    }

    #[test]
    fn no_fields_message_is_forwarded() {
        let err = ApiError::from(AccountError::NoFieldsProvided);
        assert_eq!(err.to_string(), "no fields provided for update");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn number_collision_renders_as_bad_request() {
        let resp = ApiError::from(AccountError::ConstraintViolation(4242)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "account number 4242 already exists" })
        );
    }
}
