use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};

use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::{Account, NewAccount};
use crate::domain::accounts::error::AccountError;
use crate::domain::accounts::patch::AccountPatch;
use crate::infrastructure::db::PgPool;

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, number, balance, created_at, updated_at";

pub struct SqlxAccountRepository {
    pub pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Renders a patch as a single `UPDATE` touching only the patched columns.
pub fn build_update_query(id: i32, patch: &AccountPatch) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE accounts SET ");
    {
        let mut set = qb.separated(", ");
        for field in patch.fields() {
            set.push(format!("{} = ", field.column()));
            set.push_bind_unseparated(field.value().to_string());
        }
        set.push("updated_at = ");
        set.push_bind_unseparated(patch.updated_at());
    }
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb
}

fn map_account(r: &PgRow) -> Account {
    Account {
        id: r.get("id"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        number: r.get("number"),
        balance: r.get("balance"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn store_err(e: sqlx::Error) -> AccountError {
    AccountError::Store(e.into())
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AccountError> {
        let sql = format!(
            "INSERT INTO accounts (first_name, last_name, number, balance, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.number)
            .bind(account.balance)
            .bind(account.created_at)
            .bind(account.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    AccountError::ConstraintViolation(account.number)
                }
                other => store_err(other),
            })?;
        Ok(map_account(&row))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AccountError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(row.as_ref().map(map_account))
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, AccountError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE number = $1");
        let row = sqlx::query(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(row.as_ref().map(map_account))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(rows.iter().map(map_account).collect())
    }

    async fn update_account(&self, id: i32, patch: &AccountPatch) -> Result<bool, AccountError> {
        let mut qb = build_update_query(id, patch);
        let res = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_account(&self, id: i32) -> Result<bool, AccountError> {
        let res = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(res.rows_affected() > 0)
    }
}
