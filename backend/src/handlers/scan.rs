//! Barcode scan endpoint: lookup, goods receipt or sale in one call

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{barcode_text, parse_movement_quantity, Product, SaleReceipt};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::services::{CatalogService, StockService};
use crate::AppState;

/// Body of `POST /api/scan`
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default, deserialize_with = "barcode_text")]
    pub barcode: String,
    /// `lookup` (default), `receive` or `sale`
    #[serde(rename = "type")]
    pub scan_type: Option<String>,
    /// Units to receive or sell, defaults to 1
    pub quantity: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    Lookup,
    Receive,
    Sale,
}

impl ScanAction {
    pub fn parse(scan_type: Option<&str>) -> AppResult<Self> {
        match scan_type.map(str::trim).unwrap_or("lookup") {
            "lookup" => Ok(ScanAction::Lookup),
            "receive" => Ok(ScanAction::Receive),
            "sale" => Ok(ScanAction::Sale),
            _ => Err(AppError::Validation {
                field: "type".to_string(),
                message: "Invalid scan type".to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanResponse {
    Lookup {
        success: bool,
        product: Product,
    },
    Receive {
        success: bool,
        message: String,
        new_quantity: i32,
    },
    Sale {
        success: bool,
        message: String,
        sale: SaleReceipt,
    },
}

fn scan_quantity(value: Option<&Value>) -> AppResult<i32> {
    match value {
        None | Some(Value::Null) => Ok(1),
        Some(value) => parse_movement_quantity(value).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        }),
    }
}

/// Handle a barcode scan
pub async fn scan_barcode(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ScanRequest>,
) -> AppResult<Json<ScanResponse>> {
    let barcode = req.barcode.trim();
    if barcode.is_empty() {
        return Err(AppError::Validation {
            field: "barcode".to_string(),
            message: "No barcode provided".to_string(),
        });
    }

    let response = match ScanAction::parse(req.scan_type.as_deref())? {
        ScanAction::Lookup => {
            let product = CatalogService::new(state.db).lookup(barcode).await?;
            ScanResponse::Lookup {
                success: true,
                product,
            }
        }
        ScanAction::Receive => {
            let quantity = scan_quantity(req.quantity.as_ref())?;
            let movement = StockService::new(state.db).receive(barcode, quantity).await?;
            ScanResponse::Receive {
                success: true,
                message: format!(
                    "Added {} units. New quantity: {}",
                    quantity, movement.new_quantity
                ),
                new_quantity: movement.new_quantity,
            }
        }
        ScanAction::Sale => {
            let quantity = scan_quantity(req.quantity.as_ref())?;
            let receipt = StockService::new(state.db).record_sale(barcode, quantity).await?;
            ScanResponse::Sale {
                success: true,
                message: format!("Sale processed. Remaining stock: {}", receipt.remaining_stock),
                sale: receipt,
            }
        }
    };

    Ok(Json(response))
}
