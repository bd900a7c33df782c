use chrono::Utc;

use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::error::AccountError;
use crate::domain::accounts::patch::{AccountChanges, AccountPatch};

pub struct UpdateAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> UpdateAccount<'a, R> {
    pub async fn execute(&self, id: i32, changes: &AccountChanges) -> Result<(), AccountError> {
        let patch = AccountPatch::from_changes(changes, Utc::now())?;
        let updated = self.repo.update_account(id, &patch).await?;
        if !updated {
            return Err(AccountError::NotFound(id));
        }
        tracing::debug!(account_id = id, fields = patch.fields().len(), "account_updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::accounts::account::NewAccount;
    use crate::infrastructure::memory::InMemoryAccountRepository;

    #[tokio::test]
    async fn changes_only_the_given_field() {
        let repo = InMemoryAccountRepository::new();
        let acc = repo
            .create_account(&NewAccount::with_number("Ada", "Lovelace", 10))
            .await
            .unwrap();
        let uc = UpdateAccount { repo: &repo };
        let changes = AccountChanges {
            last_name: Some("Byron".into()),
            ..Default::default()
        };
        uc.execute(acc.id, &changes).await.unwrap();

        let stored = repo.find_by_id(acc.id).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Ada");
        assert_eq!(stored.last_name, "Byron");
        assert_eq!(stored.number, acc.number);
        assert!(stored.updated_at >= acc.updated_at);
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let repo = InMemoryAccountRepository::new();
        let uc = UpdateAccount { repo: &repo };
        let changes = AccountChanges {
            first_name: Some("Grace".into()),
            ..Default::default()
        };
        let err = uc.execute(5, &changes).await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(5)));
    }

    #[tokio::test]
    async fn empty_request_never_reaches_the_store() {
        let repo = InMemoryAccountRepository::new();
        let uc = UpdateAccount { repo: &repo };
        let err = uc.execute(5, &AccountChanges::default()).await.unwrap_err();
        assert!(matches!(err, AccountError::NoFieldsProvided));
    }
}
