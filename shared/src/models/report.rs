//! Report structures returned by the reporting endpoints

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LowStockItem, Sale};

/// Snapshot of the whole catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryReport {
    pub total_products: i64,
    pub total_value: Decimal,
    pub low_stock_items: Vec<LowStockItem>,
    pub categories: BTreeMap<String, CategorySummary>,
}

/// Product count and stock value of one category
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub count: i64,
    pub value: Decimal,
}

/// Sales totals for today, the trailing week, and the latest sales
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesReport {
    pub today: SalesBucket,
    pub week: SalesBucket,
    pub recent_sales: Vec<Sale>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SalesBucket {
    pub count: i64,
    pub total: Decimal,
}

/// Headline numbers for the scanner UI landing page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_products: i64,
    pub low_stock_count: i64,
    pub total_sales_today: i64,
    pub total_inventory_value: Decimal,
    pub low_stock_items: Vec<LowStockItem>,
}
