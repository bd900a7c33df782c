use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::{Account, NewAccount};
use crate::domain::accounts::error::AccountError;

pub struct CreateAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

impl<'a, R: AccountRepository + ?Sized> CreateAccount<'a, R> {
    /// A number collision surfaces as `ConstraintViolation`; nothing is retried.
    pub async fn execute(&self, req: &CreateAccountRequest) -> Result<Account, AccountError> {
        let new = NewAccount::generate(req.first_name.clone(), req.last_name.clone());
        let account = self.repo.create_account(&new).await?;
        tracing::info!(account_id = account.id, "account_created");
        Ok(account)
    }
}
