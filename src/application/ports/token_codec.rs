use serde::{Deserialize, Serialize};

use crate::domain::accounts::account::Account;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    pub exp: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token")]
    Signing,
}

pub trait TokenCodec: Send + Sync {
    fn issue(&self, account: &Account) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<AccountClaims, TokenError>;
}
