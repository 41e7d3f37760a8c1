use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};

use crate::application::{LedgerService, NewAccount, NewTransaction};
use crate::domain::{
    format_output_date, Account, AccountAggregate, AccountId, AccountType, Transaction,
    TransactionAggregate, TransactionType,
};
use crate::io::Exporter;

/// Tally - account and transaction ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "A small account and transaction ledger with aggregate queries")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "TALLY_DATABASE", default_value = "tally.db")]
    pub database: String,

    /// Output format for query results
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// List all accounts
    AllAccounts,

    /// Show one account
    AccountById {
        /// Account ID
        id: AccountId,
    },

    /// Create a new account
    SaveAccount {
        /// Account type (e.g. CHECKING, SAVINGS)
        #[arg(short = 't', long = "type")]
        account_type: AccountType,

        /// Opening balance (defaults to 0)
        #[arg(short, long)]
        balance: Option<f64>,

        /// Creation date (YYYY/MM/DD)
        #[arg(long)]
        creation_date: Option<String>,
    },

    /// Count, sum and average of all account balances
    TotalBalance,

    /// Record a transaction against an account
    AddTransaction {
        /// Account ID
        #[arg(long)]
        account: AccountId,

        /// Amount (e.g. "50" or "50.25")
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,

        /// Transaction type: DEPOSIT or WITHDRAWAL
        #[arg(short = 't', long = "type")]
        transaction_type: TransactionType,

        /// Transaction date (YYYY/MM/DD)
        #[arg(long)]
        date: String,
    },

    /// List the transactions of one account
    AccountTransactions {
        /// Account ID
        id: AccountId,
    },

    /// List all transactions
    AllTransactions,

    /// Transaction count and per-type sums
    TransactionStats,

    /// Export data to CSV or JSON
    Export {
        /// What to export: accounts, transactions, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv, json for full)
        #[arg(long = "as")]
        export_format: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let format = self.format;

        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::AllAccounts => {
                let service = LedgerService::connect(&self.database).await?;
                let accounts = service.list_accounts().await?;
                print_accounts(format, &accounts)?;
            }

            Commands::AccountById { id } => {
                let service = LedgerService::connect(&self.database).await?;
                let account = service.get_account(id).await?;
                print_accounts(format, std::slice::from_ref(&account))?;
            }

            Commands::SaveAccount {
                account_type,
                balance,
                creation_date,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let account = service
                    .create_account(NewAccount {
                        balance,
                        account_type,
                        creation_date,
                    })
                    .await?;
                match format {
                    OutputFormat::Json => print_json(&account)?,
                    OutputFormat::Table => println!(
                        "Created account {} ({}, balance {:.2})",
                        account.id, account.account_type, account.balance
                    ),
                }
            }

            Commands::TotalBalance => {
                let service = LedgerService::connect(&self.database).await?;
                let aggregate = service.account_aggregate().await?;
                print_account_aggregate(format, &aggregate)?;
            }

            Commands::AddTransaction {
                account,
                amount,
                transaction_type,
                date,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let transaction = service
                    .create_transaction(NewTransaction {
                        account_id: account,
                        amount,
                        transaction_type,
                        date,
                    })
                    .await?;
                match format {
                    OutputFormat::Json => print_json(&transaction)?,
                    OutputFormat::Table => println!(
                        "Recorded transaction {}: {} {:.2} on account {} ({})",
                        transaction.id,
                        transaction.transaction_type,
                        transaction.amount,
                        transaction.account_id,
                        format_output_date(transaction.date)
                    ),
                }
            }

            Commands::AccountTransactions { id } => {
                let service = LedgerService::connect(&self.database).await?;
                let transactions = service.account_transactions(id).await?;
                print_transactions(format, &transactions)?;
            }

            Commands::AllTransactions => {
                let service = LedgerService::connect(&self.database).await?;
                let transactions = service.list_transactions().await?;
                print_transactions(format, &transactions)?;
            }

            Commands::TransactionStats => {
                let service = LedgerService::connect(&self.database).await?;
                let aggregate = service.transaction_aggregate().await?;
                print_transaction_aggregate(format, &aggregate)?;
            }

            Commands::Export {
                export_type,
                output,
                export_format,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(
                    &service,
                    &export_type,
                    output.as_deref(),
                    export_format.as_deref(),
                )
                .await?;
            }
        }

        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_accounts(format: OutputFormat, accounts: &[Account]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(accounts);
    }

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    println!("{:<8} {:<12} {:>14} {:<12}", "ID", "TYPE", "BALANCE", "CREATED");
    println!("{}", "-".repeat(49));
    for account in accounts {
        println!(
            "{:<8} {:<12} {:>14.2} {:<12}",
            account.id,
            account.account_type,
            account.balance,
            account
                .creation_date
                .map(format_output_date)
                .unwrap_or_else(|| "-".to_string())
        );
    }
    Ok(())
}

fn print_transactions(format: OutputFormat, transactions: &[Transaction]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(transactions);
    }

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!(
        "{:<8} {:<8} {:<12} {:>14} {:<12}",
        "ID", "ACCOUNT", "TYPE", "AMOUNT", "DATE"
    );
    println!("{}", "-".repeat(58));
    for tx in transactions {
        println!(
            "{:<8} {:<8} {:<12} {:>14.2} {:<12}",
            tx.id,
            tx.account_id,
            tx.transaction_type,
            tx.amount,
            format_output_date(tx.date)
        );
    }
    Ok(())
}

fn print_account_aggregate(format: OutputFormat, aggregate: &AccountAggregate) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(aggregate)?,
        OutputFormat::Table => {
            println!("Accounts: {}", aggregate.count);
            println!("Total:    {:.2}", aggregate.sum);
            println!("Average:  {:.2}", aggregate.average);
        }
    }
    Ok(())
}

fn print_transaction_aggregate(
    format: OutputFormat,
    aggregate: &TransactionAggregate,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(aggregate)?,
        OutputFormat::Table => {
            println!("Transactions: {}", aggregate.count);
            println!("Deposits:     {:.2}", aggregate.sum_deposits);
            println!("Withdrawals:  {:.2}", aggregate.sum_withdrawals);
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &LedgerService,
    export_type: &str,
    output: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create file: {}", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let exporter = Exporter::new(service);

    let count = match (export_type, format.unwrap_or("csv")) {
        ("accounts", "csv") => exporter.export_accounts_csv(writer).await?,
        ("accounts", "json") => exporter.export_accounts_json(writer).await?,
        ("transactions", "csv") => exporter.export_transactions_csv(writer).await?,
        ("transactions", "json") => exporter.export_transactions_json(writer).await?,
        ("full", "csv") if format.is_some() => {
            anyhow::bail!("Full export is only available as JSON");
        }
        ("full", _) => {
            let snapshot = exporter.export_full_json(writer).await?;
            snapshot.accounts.len() + snapshot.transactions.len()
        }
        (_, "csv") | (_, "json") => {
            anyhow::bail!(
                "Unknown export type '{}'. Use: accounts, transactions, full",
                export_type
            );
        }
        (_, other) => {
            anyhow::bail!("Unknown export format '{}'. Use: csv, json", other);
        }
    };

    if let Some(path) = output {
        eprintln!("Exported {} record(s) to {}", count, path);
    }

    Ok(())
}
