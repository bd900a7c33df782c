use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::token_codec::{TokenCodec, TokenError};
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account;
use crate::domain::accounts::error::AccountError;
use crate::presentation::http::error::{ApiError, ErrorBody};

pub const PERMISSION_DENIED: &str = "permission denied";

/// Login payload. Every field is optional; the handler only decodes and echoes it.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
}

pub fn routes() -> Router {
    Router::new().route("/login", post(login))
}

/// Echoes the decoded request. No token is issued here; tokens come only from
/// account creation.
#[utoipa::path(post, path = "/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginRequest),
    (status = 400, body = ErrorBody)
))]
pub async fn login(
    payload: Result<Json<LoginRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<LoginRequest>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(req))
}

// --- Bearer extractor ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::FORBIDDEN)?;
        // Both `Bearer <token>` and a bare token are accepted.
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        if token.is_empty() {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Bearer(token.to_string()))
    }
}

// --- Authorization ---

/// Why a request was refused. Callers only ever see [`PERMISSION_DENIED`].
#[derive(thiserror::Error, Debug)]
pub enum AuthDenied {
    #[error("missing bearer token")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("invalid account id in path")]
    InvalidAccountId,
    #[error("account not found")]
    AccountNotFound,
    #[error("token does not belong to the requested account")]
    OwnershipMismatch,
    #[error("account lookup failed")]
    Lookup(#[source] AccountError),
}

impl IntoResponse for AuthDenied {
    fn into_response(self) -> Response {
        match &self {
            AuthDenied::Lookup(source) => {
                tracing::error!(error = %source, "authorization_lookup_failed")
            }
            other => tracing::debug!(reason = %other, "authorization_denied"),
        }
        (
            StatusCode::FORBIDDEN,
            Json(ErrorBody {
                error: PERMISSION_DENIED.to_string(),
            }),
        )
            .into_response()
    }
}

/// Token must verify and its account number must match the account at `raw_id`.
pub async fn authorize_owner<R, T>(
    repo: &R,
    tokens: &T,
    token: Option<&str>,
    raw_id: Option<&str>,
) -> Result<Account, AuthDenied>
where
    R: AccountRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    let claims = tokens.verify(token.ok_or(AuthDenied::MissingToken)?)?;
    let id: i32 = raw_id
        .and_then(|raw| raw.parse().ok())
        .ok_or(AuthDenied::InvalidAccountId)?;
    let account = repo
        .find_by_id(id)
        .await
        .map_err(AuthDenied::Lookup)?
        .ok_or(AuthDenied::AccountNotFound)?;
    if account.number != claims.account_number {
        return Err(AuthDenied::OwnershipMismatch);
    }
    Ok(account)
}

/// Token must verify and name an account that still exists.
pub async fn authorize_holder<R, T>(
    repo: &R,
    tokens: &T,
    token: Option<&str>,
) -> Result<Account, AuthDenied>
where
    R: AccountRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    let claims = tokens.verify(token.ok_or(AuthDenied::MissingToken)?)?;
    repo.find_by_number(claims.account_number)
        .await
        .map_err(AuthDenied::Lookup)?
        .ok_or(AuthDenied::AccountNotFound)
}

pub async fn require_account_owner(
    State(ctx): State<AppContext>,
    path: Option<Path<String>>,
    bearer: Option<Bearer>,
    req: Request,
    next: Next,
) -> Response {
    let repo = ctx.account_repo();
    let tokens = ctx.tokens();
    let token = bearer.as_ref().map(|b| b.0.as_str());
    let raw_id = path.as_ref().map(|Path(raw)| raw.as_str());
    match authorize_owner(repo.as_ref(), tokens.as_ref(), token, raw_id).await {
        Ok(_) => next.run(req).await,
        Err(denied) => denied.into_response(),
    }
}

pub async fn require_token_holder(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    req: Request,
    next: Next,
) -> Response {
    let repo = ctx.account_repo();
    let tokens = ctx.tokens();
    let token = bearer.as_ref().map(|b| b.0.as_str());
    match authorize_holder(repo.as_ref(), tokens.as_ref(), token).await {
        Ok(_) => next.run(req).await,
        Err(denied) => denied.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::token_codec::AccountClaims;
    use crate::domain::accounts::account::NewAccount;
    use crate::infrastructure::crypto::jwt::JwtTokenCodec;
    use crate::infrastructure::memory::InMemoryAccountRepository;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    const SECRET: &[u8] = b"test-secret";

    async fn setup() -> (InMemoryAccountRepository, JwtTokenCodec, Account, Account) {
        let repo = InMemoryAccountRepository::new();
        let codec = JwtTokenCodec::new(SECRET, 3600);
        let ada = repo
            .create_account(&NewAccount::with_number("Ada", "Lovelace", 111))
            .await
            .unwrap();
        let grace = repo
            .create_account(&NewAccount::with_number("Grace", "Hopper", 222))
            .await
            .unwrap();
        (repo, codec, ada, grace)
    }

    #[tokio::test]
    async fn owner_with_valid_token_is_confirmed() {
        let (repo, codec, ada, _) = setup().await;
        let token = codec.issue(&ada).unwrap();
        let id = ada.id.to_string();
        let acc = authorize_owner(&repo, &codec, Some(token.as_str()), Some(id.as_str()))
            .await
            .unwrap();
        assert_eq!(acc.id, ada.id);
    }

    #[tokio::test]
    async fn token_for_another_account_is_denied() {
        let (repo, codec, ada, grace) = setup().await;
        let token = codec.issue(&grace).unwrap();
        let id = ada.id.to_string();
        let err = authorize_owner(&repo, &codec, Some(token.as_str()), Some(id.as_str()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::OwnershipMismatch));
    }

    #[tokio::test]
    async fn expired_token_is_denied_even_for_owner() {
        let (repo, codec, ada, _) = setup().await;
        let claims = AccountClaims {
            account_number: ada.number,
            exp: chrono::Utc::now().timestamp() as usize - 60,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let id = ada.id.to_string();
        let err = authorize_owner(&repo, &codec, Some(token.as_str()), Some(id.as_str()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::Token(TokenError::Expired)));
    }

    #[tokio::test]
    async fn missing_pieces_are_denied() {
        let (repo, codec, ada, _) = setup().await;
        let token = codec.issue(&ada).unwrap();

        let err = authorize_owner(&repo, &codec, None, Some("1")).await.unwrap_err();
        assert!(matches!(err, AuthDenied::MissingToken));

        let err = authorize_owner(&repo, &codec, Some(token.as_str()), Some("x1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::InvalidAccountId));

        let err = authorize_owner(&repo, &codec, Some(token.as_str()), Some("999"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::AccountNotFound));
    }

    #[tokio::test]
    async fn holder_needs_an_existing_account() {
        let (repo, codec, ada, _) = setup().await;
        let token = codec.issue(&ada).unwrap();
        assert_eq!(
            authorize_holder(&repo, &codec, Some(token.as_str())).await.unwrap().id,
            ada.id
        );

        repo.delete_account(ada.id).await.unwrap();
        let err = authorize_holder(&repo, &codec, Some(token.as_str()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::AccountNotFound));
    }

    struct UnreachableRepo;

    #[async_trait::async_trait]
    impl AccountRepository for UnreachableRepo {
        async fn create_account(&self, _: &NewAccount) -> Result<Account, AccountError> {
            Err(AccountError::Store(anyhow::anyhow!("db down")))
        }
        async fn find_by_id(&self, _: i32) -> Result<Option<Account>, AccountError> {
            Err(AccountError::Store(anyhow::anyhow!("db down")))
        }
        async fn find_by_number(&self, _: i64) -> Result<Option<Account>, AccountError> {
            Err(AccountError::Store(anyhow::anyhow!("db down")))
        }
        async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
            Err(AccountError::Store(anyhow::anyhow!("db down")))
        }
        async fn update_account(
            &self,
            _: i32,
            _: &crate::domain::accounts::patch::AccountPatch,
        ) -> Result<bool, AccountError> {
            Err(AccountError::Store(anyhow::anyhow!("db down")))
        }
        async fn delete_account(&self, _: i32) -> Result<bool, AccountError> {
            Err(AccountError::Store(anyhow::anyhow!("db down")))
        }
    }

    #[tokio::test]
    async fn store_failure_is_a_lookup_denial() {
        let (_, codec, ada, _) = setup().await;
        let token = codec.issue(&ada).unwrap();
        let id = ada.id.to_string();

        let err = authorize_owner(&UnreachableRepo, &codec, Some(token.as_str()), Some(id.as_str()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::Lookup(AccountError::Store(_))));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

        let err = authorize_holder(&UnreachableRepo, &codec, Some(token.as_str()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthDenied::Lookup(_)));
    }

    #[test]
    fn denial_body_is_uniform() {
        let resp = AuthDenied::OwnershipMismatch.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
