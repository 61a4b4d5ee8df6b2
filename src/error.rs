//! Error types for portfolio loading and report output
//!
//! The calculation core is infallible; only the edges that touch files,
//! JSON/CSV, or cross-record lookups return errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepositError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record failed the checks the calculation core relies on
    #[error("Invalid record '{id}': {reason}")]
    Validation { id: String, reason: String },

    #[error("Deposit '{deposit_id}' references unknown bank '{bank_id}'")]
    UnknownBank { deposit_id: String, bank_id: String },
}

impl DepositError {
    pub fn validation(id: impl Into<String>, reason: impl Into<String>) -> Self {
        DepositError::Validation {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DepositError>;
