//! Stock movement audit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of quantity change recorded in the audit trail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Goods received into stock
    Receive,
    /// Goods sold at the till
    Sale,
    /// Initial stock, manual quantity edits and removals
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Receive => "receive",
            MovementType::Sale => "sale",
            MovementType::Adjustment => "adjustment",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "receive" => Ok(MovementType::Receive),
            "sale" => Ok(MovementType::Sale),
            "adjustment" => Ok(MovementType::Adjustment),
            other => Err(format!("unknown movement type '{}'", other)),
        }
    }
}

/// One committed quantity change for a barcode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub id: Uuid,
    pub barcode: String,
    pub movement_type: MovementType,
    /// Signed delta: positive for receipts, negative for sales
    pub quantity: i32,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}
