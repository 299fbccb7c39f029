//! HTTP handlers for the scanner UI API

pub mod health;
pub mod products;
pub mod reports;
pub mod sales;
pub mod scan;

pub use health::health_check;
pub use products::{
    create_product, delete_product, get_product, get_product_movements, list_products,
    update_product,
};
pub use reports::{get_dashboard, get_inventory_report, get_sales_report};
pub use sales::list_sales;
pub use scan::scan_barcode;

use serde::Serialize;

/// Plain acknowledgement for mutations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
