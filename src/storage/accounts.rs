use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::date::{format_output_date, parse_output_date};
use crate::domain::{Account, AccountDraft, AccountId, AccountType};

/// Persistence for accounts.
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account and return it as stored, with its generated id.
    pub async fn insert(&self, draft: &AccountDraft) -> Result<Account> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts (balance, account_type, creation_date)
            VALUES (?, ?, ?)
            RETURNING id, balance, account_type, creation_date
            "#,
        )
        .bind(draft.balance)
        .bind(draft.account_type.as_str())
        .bind(draft.creation_date.map(format_output_date))
        .fetch_one(&self.pool)
        .await
        .context("Failed to save account")?;

        Self::row_to_account(&row)
    }

    /// Get an account by ID.
    pub async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, balance, account_type, creation_date
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    /// List all accounts in insertion order.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            "SELECT id, balance, account_type, creation_date FROM accounts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list accounts")?;

        rows.iter().map(Self::row_to_account).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count accounts")?;
        Ok(row.get("count"))
    }

    /// Sum of all balances, `None` when there are no accounts.
    pub async fn sum_balances(&self) -> Result<Option<f64>> {
        let row = sqlx::query("SELECT SUM(balance) as total FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to sum account balances")?;
        Ok(row.get("total"))
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        let account_type_str: String = row.get("account_type");
        let creation_date_str: Option<String> = row.get("creation_date");

        Ok(Account {
            id: row.get("id"),
            balance: row.get("balance"),
            account_type: account_type_str
                .parse::<AccountType>()
                .with_context(|| format!("Invalid account type: {:?}", account_type_str))?,
            creation_date: creation_date_str
                .map(|s| parse_output_date(&s))
                .transpose()
                .context("Invalid creation_date")?,
        })
    }
}
