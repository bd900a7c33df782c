use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::Account;
use crate::domain::accounts::error::AccountError;

pub struct ListAccounts<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> ListAccounts<'a, R> {
    pub async fn execute(&self) -> Result<Vec<Account>, AccountError> {
        self.repo.list_accounts().await
    }
}
