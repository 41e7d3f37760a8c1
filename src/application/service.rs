use tracing::{debug, info, warn};

use crate::domain::{
    parse_input_date, parse_optional_input_date, Account, AccountAggregate, AccountDraft,
    AccountId, AccountType, Transaction, TransactionAggregate, TransactionDraft, TransactionType,
};
use crate::storage::{self, AccountRepository, TransactionRepository};

use super::AppError;

/// Application service providing the ledger's queries and mutations.
/// This is the primary interface for any client (CLI, API, etc.).
pub struct LedgerService {
    accounts: AccountRepository,
    transactions: TransactionRepository,
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub balance: Option<f64>,
    pub account_type: AccountType,
    /// `YYYY/MM/DD`; `None` or empty leaves the date unset
    pub creation_date: Option<String>,
}

/// Input for recording a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub amount: f64,
    pub transaction_type: TransactionType,
    /// `YYYY/MM/DD`
    pub date: String,
}

impl LedgerService {
    /// Create a ledger service over the given repositories.
    pub fn new(accounts: AccountRepository, transactions: TransactionRepository) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    /// Initialize (create and migrate) a database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = storage::init(&db_url).await?;
        Ok(Self::new(
            AccountRepository::new(pool.clone()),
            TransactionRepository::new(pool),
        ))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let pool = storage::connect(&db_url).await?;
        Ok(Self::new(
            AccountRepository::new(pool.clone()),
            TransactionRepository::new(pool),
        ))
    }

    // ========================
    // Account operations
    // ========================

    /// List all accounts.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        let accounts = self.accounts.list().await?;
        debug!(count = accounts.len(), "listed accounts");
        Ok(accounts)
    }

    /// Get an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, AppError> {
        self.accounts
            .get(id)
            .await?
            .ok_or(AppError::AccountNotFound(id))
    }

    /// Create a new account.
    pub async fn create_account(&self, request: NewAccount) -> Result<Account, AppError> {
        let balance = request.balance.unwrap_or(0.0);
        ensure_finite("balance", balance)?;

        let creation_date = parse_optional_input_date(request.creation_date.as_deref())
            .map_err(|e| {
                warn!(input = %e.0, "rejected account creation date");
                AppError::InvalidDate(e.0)
            })?;

        let draft = AccountDraft {
            balance,
            account_type: request.account_type,
            creation_date,
        };
        let account = self.accounts.insert(&draft).await?;

        info!(
            account_id = account.id,
            account_type = %account.account_type,
            balance = account.balance,
            "account created"
        );
        Ok(account)
    }

    /// Count, sum and average of all account balances.
    pub async fn account_aggregate(&self) -> Result<AccountAggregate, AppError> {
        let count = self.accounts.count().await?;
        let sum = self.accounts.sum_balances().await?;
        Ok(AccountAggregate::from_totals(count, sum))
    }

    // ========================
    // Transaction operations
    // ========================

    /// List all transactions.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        let transactions = self.transactions.list().await?;
        debug!(count = transactions.len(), "listed transactions");
        Ok(transactions)
    }

    /// Record a transaction against an existing account.
    pub async fn create_transaction(
        &self,
        request: NewTransaction,
    ) -> Result<Transaction, AppError> {
        let account = self.get_account(request.account_id).await?;
        ensure_finite("amount", request.amount)?;

        let date = parse_input_date(&request.date).map_err(|e| {
            warn!(input = %e.0, "rejected transaction date");
            AppError::InvalidDate(e.0)
        })?;

        let draft = TransactionDraft {
            account_id: account.id,
            amount: request.amount,
            transaction_type: request.transaction_type,
            date,
        };
        let transaction = self.transactions.insert(&draft).await?;

        info!(
            transaction_id = transaction.id,
            account_id = transaction.account_id,
            transaction_type = %transaction.transaction_type,
            amount = transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    /// List the transactions of one account.
    pub async fn account_transactions(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, AppError> {
        let account = self.get_account(account_id).await?;
        Ok(self.transactions.list_for_account(account.id).await?)
    }

    /// Transaction count and per-type sums.
    pub async fn transaction_aggregate(&self) -> Result<TransactionAggregate, AppError> {
        let count = self.transactions.count().await?;
        let deposits = self.transactions.sum_by_type(TransactionType::Deposit).await?;
        let withdrawals = self
            .transactions
            .sum_by_type(TransactionType::Withdrawal)
            .await?;
        Ok(TransactionAggregate::from_totals(count, deposits, withdrawals))
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{} must be a finite number",
            field
        )))
    }
}
