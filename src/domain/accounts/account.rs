use chrono::{DateTime, Utc};
use rand::Rng;

/// Account numbers are drawn uniformly from `0..ACCOUNT_NUMBER_RANGE`.
pub const ACCOUNT_NUMBER_RANGE: i64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An account that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn generate(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let number = rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_RANGE);
        Self::with_number(first_name, last_name, number)
    }

    pub fn with_number(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        number: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number,
            balance: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_account(self, id: i32) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            balance: self.balance,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_accounts_start_empty_with_number_in_range() {
        for _ in 0..64 {
            let acc = NewAccount::generate("Ada", "Lovelace");
            assert!((0..ACCOUNT_NUMBER_RANGE).contains(&acc.number));
            assert_eq!(acc.balance, 0);
            assert_eq!(acc.created_at, acc.updated_at);
        }
    }

    #[test]
    fn into_account_keeps_fields() {
        let new = NewAccount::with_number("Ada", "Lovelace", 42);
        let acc = new.clone().into_account(7);
        assert_eq!(acc.id, 7);
        assert_eq!(acc.number, 42);
        assert_eq!(acc.first_name, new.first_name);
        assert_eq!(acc.created_at, new.created_at);
    }
}
