mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{open_account, record, test_service};
use tally::application::{ErrorKind, NewTransaction};
use tally::domain::{AccountType, TransactionType};

#[tokio::test]
async fn test_create_transaction_links_account() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let account = open_account(&service, AccountType::Checking, 0.0).await?;

    let tx = service
        .create_transaction(NewTransaction {
            account_id: account.id,
            amount: 42.5,
            transaction_type: TransactionType::Deposit,
            date: "2024/02/29".into(),
        })
        .await?;

    assert_eq!(tx.account_id, account.id);
    assert_eq!(tx.amount, 42.5);
    assert_eq!(tx.transaction_type, TransactionType::Deposit);
    assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

    let all = service.list_transactions().await?;
    assert_eq!(all, vec![tx.clone()]);

    let json = serde_json::to_value(&tx)?;
    assert_eq!(json["date"], "2024-02-29");
    assert_eq!(json["type"], "DEPOSIT");

    Ok(())
}

#[tokio::test]
async fn test_transaction_for_unknown_account_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let account = open_account(&service, AccountType::Checking, 0.0).await?;
    record(&service, account.id, 10.0, TransactionType::Deposit).await?;

    let err = service
        .create_transaction(NewTransaction {
            account_id: account.id + 100,
            amount: 10.0,
            transaction_type: TransactionType::Deposit,
            date: "2024/01/01".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(service.list_transactions().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_transaction_with_invalid_date_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let account = open_account(&service, AccountType::Savings, 0.0).await?;

    for bad in [
        "2024/13/40",
        "2024-01-01",
        "",
        "2024/01/01T00:00",
        "24/03/15",
        "2024/3/5",
        "+2024/03/15",
        " 2024/03/15",
    ] {
        let err = service
            .create_transaction(NewTransaction {
                account_id: account.id,
                amount: 10.0,
                transaction_type: TransactionType::Withdrawal,
                date: bad.into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "input {bad:?}");
    }

    assert!(service.list_transactions().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_transaction_with_non_finite_amount_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let account = open_account(&service, AccountType::Checking, 0.0).await?;

    for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = service
            .create_transaction(NewTransaction {
                account_id: account.id,
                amount,
                transaction_type: TransactionType::Deposit,
                date: "2024/01/15".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "amount {amount}");
    }

    assert!(service.list_transactions().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_transaction_aggregate() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let empty = service.transaction_aggregate().await?;
    assert_eq!(empty.count, 0);
    assert_eq!(empty.sum_deposits, 0.0);
    assert_eq!(empty.sum_withdrawals, 0.0);

    let checking = open_account(&service, AccountType::Checking, 0.0).await?;
    let savings = open_account(&service, AccountType::Savings, 0.0).await?;
    record(&service, checking.id, 50.0, TransactionType::Deposit).await?;
    record(&service, savings.id, 30.0, TransactionType::Deposit).await?;
    record(&service, checking.id, 20.0, TransactionType::Withdrawal).await?;

    let stats = service.transaction_aggregate().await?;
    assert_eq!(stats.count, 3);
    assert_eq!(stats.sum_deposits, 80.0);
    assert_eq!(stats.sum_withdrawals, 20.0);

    Ok(())
}

#[tokio::test]
async fn test_deposits_only_leave_withdrawals_at_zero() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let account = open_account(&service, AccountType::Checking, 0.0).await?;
    record(&service, account.id, 12.0, TransactionType::Deposit).await?;

    let stats = service.transaction_aggregate().await?;
    assert_eq!(stats.count, 1);
    assert_eq!(stats.sum_deposits, 12.0);
    assert_eq!(stats.sum_withdrawals, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_account_transactions() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let checking = open_account(&service, AccountType::Checking, 0.0).await?;
    let savings = open_account(&service, AccountType::Savings, 0.0).await?;

    assert!(service.account_transactions(checking.id).await?.is_empty());

    let first = record(&service, checking.id, 5.0, TransactionType::Deposit).await?;
    record(&service, savings.id, 7.0, TransactionType::Deposit).await?;
    let second = record(&service, checking.id, 2.0, TransactionType::Withdrawal).await?;

    let listed = service.account_transactions(checking.id).await?;
    assert_eq!(listed, vec![first, second]);

    let err = service.account_transactions(savings.id + 100).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    Ok(())
}

#[tokio::test]
async fn test_data_survives_reconnect() -> Result<()> {
    let (service, temp) = test_service().await?;
    let account = open_account(&service, AccountType::Checking, 75.0).await?;
    record(&service, account.id, 25.0, TransactionType::Withdrawal).await?;
    drop(service);

    let db_path = temp.path().join("test.db");
    let reopened = tally::LedgerService::connect(db_path.to_str().unwrap()).await?;
    assert_eq!(reopened.get_account(account.id).await?, account);
    assert_eq!(reopened.account_transactions(account.id).await?.len(), 1);

    Ok(())
}
