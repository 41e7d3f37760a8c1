// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use tally::application::{LedgerService, NewAccount, NewTransaction};
use tally::domain::{Account, AccountId, AccountType, Transaction, TransactionType};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Create an account with the given balance and no creation date
pub async fn open_account(
    service: &LedgerService,
    account_type: AccountType,
    balance: f64,
) -> Result<Account> {
    Ok(service
        .create_account(NewAccount {
            balance: Some(balance),
            account_type,
            creation_date: None,
        })
        .await?)
}

/// Record a transaction dated 2024/01/15
pub async fn record(
    service: &LedgerService,
    account_id: AccountId,
    amount: f64,
    transaction_type: TransactionType,
) -> Result<Transaction> {
    Ok(service
        .create_transaction(NewTransaction {
            account_id,
            amount,
            transaction_type,
            date: "2024/01/15".into(),
        })
        .await?)
}
