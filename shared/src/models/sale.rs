//! Sale records

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed sale. Product name and unit price are snapshots taken at
/// sale time and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: Uuid,
    pub barcode: String,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    /// Calendar date of the sale in UTC
    pub fn sale_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Result of a successful sale scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleReceipt {
    #[serde(flatten)]
    pub sale: Sale,
    pub remaining_stock: i32,
}
