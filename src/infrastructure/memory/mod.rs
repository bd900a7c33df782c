use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::{Account, NewAccount};
use crate::domain::accounts::error::AccountError;
use crate::domain::accounts::patch::AccountPatch;

/// Process-local account store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    inner: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    accounts: BTreeMap<i32, Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AccountError> {
        let mut state = self.inner.write().await;
        if state.accounts.values().any(|a| a.number == account.number) {
            return Err(AccountError::ConstraintViolation(account.number));
        }
        state.next_id += 1;
        let created = account.clone().into_account(state.next_id);
        state.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AccountError> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, AccountError> {
        let state = self.inner.read().await;
        Ok(state.accounts.values().find(|a| a.number == number).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.inner.read().await.accounts.values().cloned().collect())
    }

    async fn update_account(&self, id: i32, patch: &AccountPatch) -> Result<bool, AccountError> {
        let mut state = self.inner.write().await;
        match state.accounts.get_mut(&id) {
            Some(account) => {
                patch.apply(account);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_account(&self, id: i32) -> Result<bool, AccountError> {
        Ok(self.inner.write().await.accounts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::accounts::patch::AccountChanges;
    use chrono::Utc;

    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_in_order() {
        let repo = InMemoryAccountRepository::new();
        assert!(repo.list_accounts().await.unwrap().is_empty());

        let a = repo
            .create_account(&NewAccount::with_number("Ada", "Lovelace", 1))
            .await
            .unwrap();
        let b = repo
            .create_account(&NewAccount::with_number("Grace", "Hopper", 2))
            .await
            .unwrap();
        assert!(a.id > 0);
        assert!(b.id > a.id);

        let ids: Vec<_> = repo.list_accounts().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn duplicate_number_is_a_constraint_violation() {
        let repo = InMemoryAccountRepository::new();
        repo.create_account(&NewAccount::with_number("Ada", "Lovelace", 77))
            .await
            .unwrap();
        let err = repo
            .create_account(&NewAccount::with_number("Grace", "Hopper", 77))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::ConstraintViolation(77)));
        assert_eq!(repo.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = InMemoryAccountRepository::new();
        let patch = AccountPatch::from_changes(
            &AccountChanges {
                first_name: Some("Grace".into()),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        assert!(!repo.update_account(404, &patch).await.unwrap());
        assert!(!repo.delete_account(404).await.unwrap());
    }
}
