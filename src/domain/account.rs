use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type AccountId = i64;

/// Account category. The two common kinds are named; deployments may use
/// any other non-empty label, which is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AccountType {
    Checking,
    Savings,
    Other(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("account type must not be empty")]
pub struct ParseAccountTypeError;

impl AccountType {
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
            AccountType::Other(label) => label,
        }
    }
}

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseAccountTypeError);
        }
        Ok(match s.to_uppercase().as_str() {
            "CHECKING" => AccountType::Checking,
            "SAVINGS" => AccountType::Savings,
            _ => AccountType::Other(s.to_string()),
        })
    }
}

impl TryFrom<String> for AccountType {
    type Error = ParseAccountTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountType> for String {
    fn from(value: AccountType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A balance-holding account as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub balance: f64,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default, with = "super::date::output_date::option")]
    pub creation_date: Option<NaiveDate>,
}

/// Validated fields of an account that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub balance: f64,
    pub account_type: AccountType,
    pub creation_date: Option<NaiveDate>,
}
