use thiserror::Error;

use crate::domain::AccountId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Invalid date format, use YYYY/MM/DD")]
    InvalidDate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

/// Broad failure category, for callers that only need to branch on cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    StoreFailure,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::AccountNotFound(_) => ErrorKind::NotFound,
            AppError::InvalidDate(_) | AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::Database(_) => ErrorKind::StoreFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::AccountNotFound(4).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::InvalidDate("2024-01-01".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            AppError::Database(anyhow::anyhow!("disk full")).kind(),
            ErrorKind::StoreFailure
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::AccountNotFound(42).to_string(),
            "Account not found: 42"
        );
        assert_eq!(
            AppError::InvalidDate("bad".into()).to_string(),
            "Invalid date format, use YYYY/MM/DD"
        );
    }
}
