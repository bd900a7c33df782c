use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    handler::Handler,
    http::{HeaderMap, HeaderValue},
    middleware,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::accounts::create_account::{
    CreateAccount, CreateAccountRequest as CreateAccountDto,
};
use crate::application::use_cases::accounts::delete_account::DeleteAccount;
use crate::application::use_cases::accounts::get_account::GetAccount;
use crate::application::use_cases::accounts::list_accounts::ListAccounts;
use crate::application::use_cases::accounts::update_account::UpdateAccount;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account as DomainAccount;
use crate::domain::accounts::patch::AccountChanges;
use crate::presentation::http::auth;
use crate::presentation::http::error::{ApiError, parse_account_id};

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DomainAccount> for Account {
    fn from(a: DomainAccount) -> Self {
        Account {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
            number: a.number,
            balance: a.balance,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<UpdateAccountRequest> for AccountChanges {
    fn from(r: UpdateAccountRequest) -> Self {
        AccountChanges {
            first_name: r.first_name,
            last_name: r.last_name,
            updated_at: r.updated_at,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    let holder = middleware::from_fn_with_state(ctx.clone(), auth::require_token_holder);
    let owner = middleware::from_fn_with_state(ctx.clone(), auth::require_account_owner);
    Router::new()
        .route(
            "/account",
            get(list_accounts.layer(holder)).post(create_account),
        )
        .route(
            "/account/:id",
            get(get_account)
                .delete(delete_account)
                .patch(update_account)
                .route_layer(owner),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/account", tag = "Accounts", responses(
    (status = 200, body = [Account]),
    (status = 403, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn list_accounts(State(ctx): State<AppContext>) -> Result<Json<Vec<Account>>, ApiError> {
    let repo = ctx.account_repo();
    let uc = ListAccounts {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/account", tag = "Accounts", request_body = CreateAccountRequest, security(()), responses(
    (status = 200, body = Account, headers(("x-access-token" = String, description = "Bearer token for the new account"))),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_account(
    State(ctx): State<AppContext>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<Account>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.account_repo();
    let uc = CreateAccount {
        repo: repo.as_ref(),
    };
    let dto = CreateAccountDto {
        first_name: req.first_name,
        last_name: req.last_name,
    };
    let account = uc.execute(&dto).await?;
    let token = ctx.tokens().issue(&account)?;

    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(&token) {
        headers.insert(ACCESS_TOKEN_HEADER, v);
    }
    Ok((headers, Json(account.into())))
}

#[utoipa::path(get, path = "/account/{id}", tag = "Accounts",
    params(("id" = i32, Path, description = "Account id")),
    responses((status = 200, body = Account), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn get_account(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let id = parse_account_id(&raw_id)?;
    let repo = ctx.account_repo();
    let uc = GetAccount {
        repo: repo.as_ref(),
    };
    let account = uc.execute(id).await?;
    Ok(Json(account.into()))
}

#[utoipa::path(delete, path = "/account/{id}", tag = "Accounts",
    params(("id" = i32, Path, description = "Account id")),
    responses((status = 200), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn delete_account(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let id = parse_account_id(&raw_id)?;
    let repo = ctx.account_repo();
    let uc = DeleteAccount {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(Json(()))
}

#[utoipa::path(patch, path = "/account/{id}", tag = "Accounts", request_body = UpdateAccountRequest,
    params(("id" = i32, Path, description = "Account id")),
    responses((status = 200), (status = 400, body = crate::presentation::http::error::ErrorBody), (status = 403, body = crate::presentation::http::error::ErrorBody)))]
pub async fn update_account(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<Json<()>, ApiError> {
    let Json(req) = payload?;
    let id = parse_account_id(&raw_id)?;
    let repo = ctx.account_repo();
    let uc = UpdateAccount {
        repo: repo.as_ref(),
    };
    uc.execute(id, &req.into()).await?;
    Ok(Json(()))
}
