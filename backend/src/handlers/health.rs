//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    /// Catalog size, absent while the database is unreachable
    pub products: Option<i64>,
}

/// Health check endpoint handler.
///
/// Counting the catalog proves both connectivity and that the ledger
/// tables are migrated.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&state.db)
        .await;

    let (database, products) = match products {
        Ok(count) => ("connected", Some(count)),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the ledger");
            ("disconnected", None)
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        products,
    })
}
