//! Reporting service: inventory value, low stock, sales totals
//!
//! Reports are recomputed from the ledger tables on every call.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::{
    DashboardStats, DateRange, InventoryReport, ReportSettings, Sale, SalesReport,
};
use sqlx::PgPool;

use super::store::{fetch_all_products, SaleRow};
use crate::error::{AppError, AppResult};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
    settings: ReportSettings,
}

impl ReportingService {
    pub fn new(db: PgPool, settings: ReportSettings) -> Self {
        Self { db, settings }
    }

    /// Inventory value, low-stock list and per-category totals
    pub async fn inventory_report(&self) -> AppResult<InventoryReport> {
        let products = fetch_all_products(&self.db).await?;
        Ok(InventoryReport::build(
            &products,
            self.settings.low_stock_threshold,
        ))
    }

    /// Sales totals for today and the trailing window, plus the latest sales
    pub async fn sales_report(&self) -> AppResult<SalesReport> {
        self.sales_report_for(Utc::now().date_naive()).await
    }

    /// Sales report as seen on `today` (UTC)
    pub async fn sales_report_for(&self, today: NaiveDate) -> AppResult<SalesReport> {
        let window = self.settings.sales_window(today);
        let window_sales = self.sales_between(window).await?;
        let recent = self.recent_sales(self.settings.recent_sales_limit).await?;

        Ok(SalesReport::build(&window_sales, recent, today, window))
    }

    /// Headline numbers for the landing page
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let products = fetch_all_products(&self.db).await?;

        let today = DateRange::trailing_days(Utc::now().date_naive(), 1);
        let sales_today = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM sales WHERE "timestamp" >= $1 AND "timestamp" < $2"#,
        )
        .bind(today.start_instant())
        .bind(today.end_instant())
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardStats::build(
            &products,
            sales_today,
            self.settings.low_stock_threshold,
        ))
    }

    /// All sales, newest first
    pub async fn list_sales(&self) -> AppResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, barcode, product_name, quantity, price, total, "timestamp"
            FROM sales
            ORDER BY "timestamp" DESC, id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Sale::from).collect())
    }

    async fn sales_between(&self, range: DateRange) -> AppResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, barcode, product_name, quantity, price, total, "timestamp"
            FROM sales
            WHERE "timestamp" >= $1 AND "timestamp" < $2
            ORDER BY "timestamp" DESC
            "#,
        )
        .bind(range.start_instant())
        .bind(range.end_instant())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Sale::from).collect())
    }

    async fn recent_sales(&self, limit: i64) -> AppResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, barcode, product_name, quantity, price, total, "timestamp"
            FROM sales
            ORDER BY "timestamp" DESC, id
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
