use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::date::{format_output_date, parse_output_date};
use crate::domain::{AccountId, Transaction, TransactionDraft, TransactionType};

/// Persistence for transactions.
#[derive(Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new transaction and return it as stored, with its generated id.
    pub async fn insert(&self, draft: &TransactionDraft) -> Result<Transaction> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (account_id, amount, transaction_type, date)
            VALUES (?, ?, ?, ?)
            RETURNING id, account_id, amount, transaction_type, date
            "#,
        )
        .bind(draft.account_id)
        .bind(draft.amount)
        .bind(draft.transaction_type.as_str())
        .bind(format_output_date(draft.date))
        .fetch_one(&self.pool)
        .await
        .context("Failed to save transaction")?;

        Self::row_to_transaction(&row)
    }

    /// List all transactions in insertion order.
    pub async fn list(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, amount, transaction_type, date
            FROM transactions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// List transactions recorded against one account.
    pub async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, amount, transaction_type, date
            FROM transactions
            WHERE account_id = ?
            ORDER BY id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions for account")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM transactions")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count transactions")?;
        Ok(row.get("count"))
    }

    /// Sum of amounts for one transaction type, `None` when there are none.
    pub async fn sum_by_type(&self, transaction_type: TransactionType) -> Result<Option<f64>> {
        let row = sqlx::query(
            r#"
            SELECT SUM(amount) as total
            FROM transactions
            WHERE transaction_type = ?
            "#,
        )
        .bind(transaction_type.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum transactions by type")?;

        Ok(row.get("total"))
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let type_str: String = row.get("transaction_type");
        let date_str: String = row.get("date");

        Ok(Transaction {
            id: row.get("id"),
            account_id: row.get("account_id"),
            amount: row.get("amount"),
            transaction_type: type_str.parse().context("Invalid transaction type")?,
            date: parse_output_date(&date_str).context("Invalid transaction date")?,
        })
    }
}
