use axum::{
    Json, Router, extract::rejection::JsonRejection, handler::Handler, middleware, routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth;
use crate::presentation::http::error::ApiError;

/// Accepted and echoed back; balances are not touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferRequest {
    pub to_account: i64,
    pub amount: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    let holder = middleware::from_fn_with_state(ctx.clone(), auth::require_token_holder);
    Router::new()
        .route("/transfer", post(transfer.layer(holder)))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/transfer", tag = "Transfers", request_body = TransferRequest, responses(
    (status = 200, body = TransferRequest),
    (status = 400, body = crate::presentation::http::error::ErrorBody),
    (status = 403, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn transfer(
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferRequest>, ApiError> {
    let Json(req) = payload?;
    tracing::info!(to_account = req.to_account, amount = req.amount, "transfer_received");
    Ok(Json(req))
}
