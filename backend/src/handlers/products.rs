//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use shared::{Product, RegisterProductInput, StockMovement, UpdateProductInput};

use super::MessageResponse;
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::services::CatalogService;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct MovementListResponse {
    pub movements: Vec<StockMovement>,
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<ProductListResponse>> {
    let service = CatalogService::new(state.db);
    let products = service.list().await?;
    Ok(Json(ProductListResponse { products }))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let service = CatalogService::new(state.db);
    let product = service.lookup(&barcode).await?;
    Ok(Json(ProductResponse {
        success: true,
        message: None,
        product,
    }))
}

/// Register a new product
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterProductInput>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let service = CatalogService::new(state.db);
    let product = service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            message: Some("Product added successfully".to_string()),
            product,
        }),
    ))
}

/// Update the supplied fields of a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    ApiJson(input): ApiJson<UpdateProductInput>,
) -> AppResult<Json<ProductResponse>> {
    let service = CatalogService::new(state.db);
    let product = service.update(&barcode, input).await?;
    Ok(Json(ProductResponse {
        success: true,
        message: Some("Product updated successfully".to_string()),
        product,
    }))
}

/// Remove a product; its sales and movement history are kept
pub async fn delete_product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let service = CatalogService::new(state.db);
    service.delete(&barcode).await?;
    Ok(Json(MessageResponse::ok("Product deleted successfully")))
}

/// Stock movement history of a barcode
pub async fn get_product_movements(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<MovementListResponse>> {
    let service = CatalogService::new(state.db);
    let movements = service.movements(&barcode).await?;
    Ok(Json(MovementListResponse { movements }))
}
