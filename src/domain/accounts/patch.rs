use chrono::{DateTime, Utc};

use super::account::Account;
use super::error::AccountError;

/// Sparse update as received from a client. `None`, `null` and `""` all leave
/// the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountField {
    FirstName(String),
    LastName(String),
}

impl AccountField {
    pub fn column(&self) -> &'static str {
        match self {
            AccountField::FirstName(_) => "first_name",
            AccountField::LastName(_) => "last_name",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            AccountField::FirstName(v) | AccountField::LastName(v) => v,
        }
    }
}

/// A validated partial update: at least one field, always a fresh `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPatch {
    fields: Vec<AccountField>,
    updated_at: DateTime<Utc>,
}

impl AccountPatch {
    pub fn from_changes(changes: &AccountChanges, now: DateTime<Utc>) -> Result<Self, AccountError> {
        let mut fields = Vec::with_capacity(2);
        if let Some(v) = non_empty(&changes.first_name) {
            fields.push(AccountField::FirstName(v.to_string()));
        }
        if let Some(v) = non_empty(&changes.last_name) {
            fields.push(AccountField::LastName(v.to_string()));
        }
        if fields.is_empty() {
            return Err(AccountError::NoFieldsProvided);
        }
        Ok(Self {
            fields,
            updated_at: changes.updated_at.unwrap_or(now),
        })
    }

    /// Fields in column order: first name, then last name.
    pub fn fields(&self) -> &[AccountField] {
        &self.fields
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn apply(&self, account: &mut Account) {
        for field in &self.fields {
            match field {
                AccountField::FirstName(v) => account.first_name = v.clone(),
                AccountField::LastName(v) => account.last_name = v.clone(),
            }
        }
        account.updated_at = self.updated_at;
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
