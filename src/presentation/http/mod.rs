use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod accounts;
pub mod auth;
pub mod error;
pub mod health;
pub mod transfers;

/// Every account, login and transfer route, with authorization applied.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(auth::routes())
        .merge(accounts::routes(ctx.clone()))
        .merge(transfers::routes(ctx))
}
