//! Route definitions for the StockScan API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Scanner workflow
        .route("/scan", post(handlers::scan_barcode))
        .nest("/products", product_routes())
        .route("/sales", get(handlers::list_sales))
        .nest("/reports", report_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:barcode",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:barcode/movements", get(handlers::get_product_movements))
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(handlers::get_inventory_report))
        .route("/sales", get(handlers::get_sales_report))
        .route("/dashboard", get(handlers::get_dashboard))
}
