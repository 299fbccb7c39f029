//! Ledger error kinds

use thiserror::Error;

/// Expected failures of catalog and stock operations.
///
/// Storage failures are not represented here; the backend wraps them
/// separately so that this enum stays free of I/O concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Product {barcode} not found")]
    NotFound { barcode: String },

    #[error("Product {barcode} already exists")]
    DuplicateKey { barcode: String },

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Insufficient stock for {barcode}: {available} available, {requested} requested")]
    InsufficientStock {
        barcode: String,
        available: i32,
        requested: i32,
    },
}

impl LedgerError {
    pub fn not_found(barcode: impl Into<String>) -> Self {
        LedgerError::NotFound {
            barcode: barcode.into(),
        }
    }

    pub fn duplicate(barcode: impl Into<String>) -> Self {
        LedgerError::DuplicateKey {
            barcode: barcode.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
