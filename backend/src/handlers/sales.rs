//! HTTP handlers for the sales log

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::Sale;

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Debug, Serialize)]
pub struct SaleListResponse {
    pub sales: Vec<Sale>,
}

/// List all sales, newest first
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db, state.config.reports.clone());
    let sales = service.list_sales().await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&sales)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"sales.csv\""),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(SaleListResponse { sales }).into_response())
    }
}
