//! Shared types and ledger rules for the Stockscan inventory backend
//!
//! This crate holds everything that does not touch the database: the
//! product/sale/movement models, the stock arithmetic behind receipts and
//! sales, report aggregation and input validation.

pub mod error;
pub mod ledger;
pub mod models;
pub mod reporting;
pub mod types;
pub mod validation;

pub use error::*;
pub use ledger::*;
pub use models::*;
pub use reporting::*;
pub use types::*;
pub use validation::*;
