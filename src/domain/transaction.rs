use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::AccountId;

pub type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money paid into the account
    Deposit,
    /// Money taken out of the account
    Withdrawal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown transaction type '{0}', expected DEPOSIT or WITHDRAWAL")]
pub struct ParseTransactionTypeError(pub String);

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            _ => Err(ParseTransactionTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deposit or withdrawal recorded against one account.
/// Transactions are never updated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "super::date::output_date")]
    pub date: NaiveDate,
}

/// Validated fields of a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub account_id: AccountId,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_roundtrip() {
        for tt in [TransactionType::Deposit, TransactionType::Withdrawal] {
            assert_eq!(tt.as_str().parse::<TransactionType>(), Ok(tt));
        }
        assert_eq!(
            "deposit".parse::<TransactionType>(),
            Ok(TransactionType::Deposit)
        );
    }

    #[test]
    fn test_unknown_transaction_type() {
        assert!("TRANSFER".parse::<TransactionType>().is_err());
        assert!("".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = Transaction {
            id: 3,
            account_id: 1,
            amount: 20.0,
            transaction_type: TransactionType::Withdrawal,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "WITHDRAWAL");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["accountId"], 1);
    }
}
