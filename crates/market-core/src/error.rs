//! Error types for the prediction markets display core.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Authentication error: {message}")]
    Auth { message: String },
}

impl Error {
    /// Returns true if this error should be shown to the user as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InsufficientBalance { .. } | Self::InvalidAmount(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message() {
        let err = Error::InsufficientBalance {
            requested: Decimal::new(500, 0),
            available: Decimal::new(38235, 2),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 500, available 382.35"
        );
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_storage_error_not_user_facing() {
        let err = Error::Storage {
            message: "disk full".to_string(),
        };
        assert!(!err.is_user_facing());
    }
}
