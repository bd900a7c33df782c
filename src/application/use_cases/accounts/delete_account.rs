use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::error::AccountError;

pub struct DeleteAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> DeleteAccount<'a, R> {
    // Deleting an id that no longer exists is a no-op, not an error.
    pub async fn execute(&self, id: i32) -> Result<(), AccountError> {
        let deleted = self.repo.delete_account(id).await?;
        if !deleted {
            tracing::debug!(account_id = id, "delete_account_no_rows");
        }
        Ok(())
    }
}
