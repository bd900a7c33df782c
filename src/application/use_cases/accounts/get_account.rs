use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::Account;
use crate::domain::accounts::error::AccountError;

pub struct GetAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> GetAccount<'a, R> {
    pub async fn execute(&self, id: i32) -> Result<Account, AccountError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }
}
