//! Row mapping and SQL helpers shared by the ledger services

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{MovementType, Product, Sale, StockChange, StockMovement};
use sqlx::{Error as SqlxError, FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Row for the `products` table
#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    barcode: String,
    name: String,
    price: Decimal,
    quantity: i32,
    category: Option<String>,
    supplier: Option<String>,
    description: Option<String>,
    last_updated: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            barcode: row.barcode,
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            category: row.category,
            supplier: row.supplier,
            description: row.description,
            last_updated: row.last_updated,
        }
    }
}

/// Row for the `sales` table
#[derive(Debug, FromRow)]
pub(crate) struct SaleRow {
    id: Uuid,
    barcode: String,
    product_name: String,
    quantity: i32,
    price: Decimal,
    total: Decimal,
    timestamp: DateTime<Utc>,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale {
            id: row.id,
            barcode: row.barcode,
            product_name: row.product_name,
            quantity: row.quantity,
            price: row.price,
            total: row.total,
            timestamp: row.timestamp,
        }
    }
}

/// Row for the `stock_movements` table
#[derive(Debug, FromRow)]
pub(crate) struct MovementRow {
    id: Uuid,
    barcode: String,
    movement_type: String,
    quantity: i32,
    previous_quantity: i32,
    new_quantity: i32,
    notes: Option<String>,
    timestamp: DateTime<Utc>,
}

impl TryFrom<MovementRow> for StockMovement {
    type Error = AppError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        let movement_type = row
            .movement_type
            .parse::<MovementType>()
            .map_err(AppError::Internal)?;

        Ok(StockMovement {
            id: row.id,
            barcode: row.barcode,
            movement_type,
            quantity: row.quantity,
            previous_quantity: row.previous_quantity,
            new_quantity: row.new_quantity,
            notes: row.notes,
            timestamp: row.timestamp,
        })
    }
}

pub(crate) fn into_movements(rows: Vec<MovementRow>) -> AppResult<Vec<StockMovement>> {
    rows.into_iter().map(StockMovement::try_from).collect()
}

/// Postgres unique violation (SQLSTATE 23505) as a duplicate barcode
pub(crate) fn map_unique_violation(err: SqlxError, barcode: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::DuplicateEntry(barcode.to_string())
        }
        other => other.into(),
    }
}

/// All products ordered by name
pub(crate) async fn fetch_all_products(db: &PgPool) -> AppResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT barcode, name, price, quantity, category, supplier, description, last_updated
        FROM products
        ORDER BY name, barcode
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}

/// Read a product and lock its row until the surrounding transaction ends.
///
/// Every mutation of an existing product goes through here, so concurrent
/// receipts and sales on one barcode are applied one after another.
pub(crate) async fn lock_product(
    conn: &mut PgConnection,
    barcode: &str,
) -> AppResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT barcode, name, price, quantity, category, supplier, description, last_updated
        FROM products
        WHERE barcode = $1
        FOR UPDATE
        "#,
    )
    .bind(barcode)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(Product::from))
}

/// Set the stock level and refresh `last_updated`
pub(crate) async fn set_quantity(
    conn: &mut PgConnection,
    barcode: &str,
    quantity: i32,
) -> AppResult<Product> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
        SET quantity = $2, last_updated = clock_timestamp()
        WHERE barcode = $1
        RETURNING barcode, name, price, quantity, category, supplier, description, last_updated
        "#,
    )
    .bind(barcode)
    .bind(quantity)
    .fetch_one(conn)
    .await?;

    Ok(row.into())
}

/// Append a movement to the audit trail
pub(crate) async fn insert_movement(
    conn: &mut PgConnection,
    barcode: &str,
    change: &StockChange,
) -> AppResult<StockMovement> {
    let row = sqlx::query_as::<_, MovementRow>(
        r#"
        INSERT INTO stock_movements (
            barcode, movement_type, quantity, previous_quantity, new_quantity, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, barcode, movement_type, quantity, previous_quantity, new_quantity,
                  notes, "timestamp"
        "#,
    )
    .bind(barcode)
    .bind(change.movement_type.as_str())
    .bind(change.delta)
    .bind(change.previous_quantity)
    .bind(change.new_quantity)
    .bind(&change.notes)
    .fetch_one(conn)
    .await?;

    StockMovement::try_from(row)
}
