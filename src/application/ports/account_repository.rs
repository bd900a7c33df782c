use async_trait::async_trait;

use crate::domain::accounts::account::{Account, NewAccount};
use crate::domain::accounts::error::AccountError;
use crate::domain::accounts::patch::AccountPatch;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AccountError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AccountError>;
    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, AccountError>;
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;
    /// Returns `false` when no row matched `id`.
    async fn update_account(&self, id: i32, patch: &AccountPatch) -> Result<bool, AccountError>;
    async fn delete_account(&self, id: i32) -> Result<bool, AccountError>;
}
