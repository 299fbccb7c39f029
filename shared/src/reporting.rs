//! Report aggregation over catalog and sales snapshots

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    CategorySummary, DashboardStats, InventoryReport, LowStockItem, Product, Sale, SalesBucket,
    SalesReport,
};
use crate::types::DateRange;

/// Default level at or below which a product counts as low on stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Number of sales listed in the sales report
pub const RECENT_SALES_LIMIT: i64 = 10;

/// Length of the "week" bucket, today included
pub const SALES_WINDOW_DAYS: u32 = 7;

/// Low-stock items shown on the dashboard
pub const DASHBOARD_LOW_STOCK_ITEMS: usize = 5;

/// Tunables for the reporting endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSettings {
    pub low_stock_threshold: i32,
    pub recent_sales_limit: i64,
    pub sales_window_days: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            recent_sales_limit: RECENT_SALES_LIMIT,
            sales_window_days: SALES_WINDOW_DAYS,
        }
    }
}

impl ReportSettings {
    /// Date range covered by the "week" bucket for the given day
    pub fn sales_window(&self, today: NaiveDate) -> DateRange {
        DateRange::trailing_days(today, self.sales_window_days)
    }
}

impl InventoryReport {
    pub fn build(products: &[Product], low_stock_threshold: i32) -> Self {
        let mut report = InventoryReport {
            total_products: products.len() as i64,
            total_value: Decimal::ZERO,
            low_stock_items: Vec::new(),
            categories: Default::default(),
        };

        for product in products {
            let value = product.stock_value();
            report.total_value += value;

            if product.is_low_stock(low_stock_threshold) {
                report.low_stock_items.push(LowStockItem::from(product));
            }

            let category = report
                .categories
                .entry(product.category_label().to_string())
                .or_insert_with(CategorySummary::default);
            category.count += 1;
            category.value += value;
        }

        report
    }
}

impl SalesBucket {
    pub fn tally<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Self {
        sales
            .into_iter()
            .fold(SalesBucket::default(), |mut bucket, sale| {
                bucket.count += 1;
                bucket.total += sale.total;
                bucket
            })
    }
}

impl SalesReport {
    /// Build the report from the sales of the trailing window and the
    /// latest sales overall (already ordered newest first).
    ///
    /// Sales dated after `today` are ignored by both buckets.
    pub fn build(
        window_sales: &[Sale],
        recent_sales: Vec<Sale>,
        today: NaiveDate,
        window: DateRange,
    ) -> Self {
        let today_bucket =
            SalesBucket::tally(window_sales.iter().filter(|s| s.sale_date() == today));
        let week_bucket = SalesBucket::tally(
            window_sales
                .iter()
                .filter(|s| window.contains(s.sale_date()) && s.sale_date() <= today),
        );

        SalesReport {
            today: today_bucket,
            week: week_bucket,
            recent_sales,
        }
    }
}

impl DashboardStats {
    pub fn build(products: &[Product], total_sales_today: i64, low_stock_threshold: i32) -> Self {
        let low_stock: Vec<LowStockItem> = products
            .iter()
            .filter(|p| p.is_low_stock(low_stock_threshold))
            .map(LowStockItem::from)
            .collect();

        DashboardStats {
            total_products: products.len() as i64,
            low_stock_count: low_stock.len() as i64,
            total_sales_today,
            total_inventory_value: products.iter().map(Product::stock_value).sum(),
            low_stock_items: low_stock.into_iter().take(DASHBOARD_LOW_STOCK_ITEMS).collect(),
        }
    }
}
