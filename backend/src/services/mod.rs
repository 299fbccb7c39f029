//! Business logic services for the Stockscan ledger

pub mod catalog;
pub mod reporting;
pub mod stock;
mod store;

pub use catalog::CatalogService;
pub use reporting::ReportingService;
pub use stock::StockService;
