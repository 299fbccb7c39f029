//! Reporting handlers

use axum::{extract::State, Json};
use shared::{DashboardStats, InventoryReport, SalesReport};

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

fn reporting(state: AppState) -> ReportingService {
    ReportingService::new(state.db, state.config.reports.clone())
}

/// Get inventory report
pub async fn get_inventory_report(
    State(state): State<AppState>,
) -> AppResult<Json<InventoryReport>> {
    let report = reporting(state).inventory_report().await?;
    Ok(Json(report))
}

/// Get sales report
pub async fn get_sales_report(State(state): State<AppState>) -> AppResult<Json<SalesReport>> {
    let report = reporting(state).sales_report().await?;
    Ok(Json(report))
}

/// Get dashboard metrics
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = reporting(state).dashboard().await?;
    Ok(Json(stats))
}
