//! Product catalog service: lookup, registration, edits and removal

use shared::{
    plan_adjustment, plan_initial_stock, plan_removal, validate_barcode, LedgerError, Product,
    RegisterProductInput, StockMovement, UpdateProductInput,
};
use sqlx::PgPool;
use tracing::{info, instrument};

use super::store::{
    fetch_all_products, insert_movement, into_movements, lock_product, map_unique_violation,
    MovementRow, ProductRow,
};
use crate::error::AppResult;

/// Catalog service for managing products
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

pub(crate) fn checked_barcode(barcode: &str) -> AppResult<String> {
    validate_barcode(barcode).map_err(|msg| LedgerError::invalid("barcode", msg).into())
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        fetch_all_products(&self.db).await
    }

    /// Get a single product by barcode
    #[instrument(skip(self))]
    pub async fn lookup(&self, barcode: &str) -> AppResult<Product> {
        let barcode = checked_barcode(barcode)?;

        let product = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT barcode, name, price, quantity, category, supplier, description, last_updated
            FROM products
            WHERE barcode = $1
            "#,
        )
        .bind(&barcode)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| LedgerError::not_found(&barcode))?;

        Ok(product.into())
    }

    /// Register a new product.
    ///
    /// Non-zero initial stock is recorded as an adjustment movement in the
    /// same transaction.
    #[instrument(skip(self, input), fields(barcode = %input.barcode))]
    pub async fn register(&self, input: RegisterProductInput) -> AppResult<Product> {
        let new_product = input.into_new_product()?;
        let barcode = new_product.barcode.clone();

        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE barcode = $1)",
        )
        .bind(&barcode)
        .fetch_one(&mut *tx)
        .await?;

        if exists {
            return Err(LedgerError::duplicate(&barcode).into());
        }

        let product: Product = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (barcode, name, price, quantity, category, supplier, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING barcode, name, price, quantity, category, supplier, description, last_updated
            "#,
        )
        .bind(&new_product.barcode)
        .bind(&new_product.name)
        .bind(new_product.price)
        .bind(new_product.quantity)
        .bind(&new_product.category)
        .bind(&new_product.supplier)
        .bind(&new_product.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &barcode))?
        .into();

        if let Some(change) = plan_initial_stock(product.quantity) {
            insert_movement(&mut *tx, &barcode, &change).await?;
        }

        tx.commit().await?;

        info!(barcode = %product.barcode, quantity = product.quantity, "Product registered");
        Ok(product)
    }

    /// Update the supplied fields of a product.
    ///
    /// A quantity edit is recorded as an adjustment movement so that the
    /// audit trail keeps matching the stock level.
    #[instrument(skip(self, input))]
    pub async fn update(&self, barcode: &str, input: UpdateProductInput) -> AppResult<Product> {
        let barcode = checked_barcode(barcode)?;
        let patch = input.into_patch();

        let mut tx = self.db.begin().await?;

        let current = lock_product(&mut *tx, &barcode)
            .await?
            .ok_or_else(|| LedgerError::not_found(&barcode))?;
        let patch = patch?;
        let target = patch.apply(&current);

        let product: Product = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = $2, price = $3, quantity = $4, category = $5, supplier = $6,
                description = $7, last_updated = clock_timestamp()
            WHERE barcode = $1
            RETURNING barcode, name, price, quantity, category, supplier, description, last_updated
            "#,
        )
        .bind(&barcode)
        .bind(&target.name)
        .bind(target.price)
        .bind(target.quantity)
        .bind(&target.category)
        .bind(&target.supplier)
        .bind(&target.description)
        .fetch_one(&mut *tx)
        .await?
        .into();

        if let Some(change) =
            plan_adjustment(current.quantity, product.quantity, "Quantity edited manually")
        {
            insert_movement(&mut *tx, &barcode, &change).await?;
        }

        tx.commit().await?;

        info!(barcode = %barcode, "Product updated");
        Ok(product)
    }

    /// Remove a product from the catalog.
    ///
    /// Sales and movements recorded for the barcode are kept; remaining
    /// stock is written off with a closing adjustment.
    #[instrument(skip(self))]
    pub async fn delete(&self, barcode: &str) -> AppResult<()> {
        let barcode = checked_barcode(barcode)?;

        let mut tx = self.db.begin().await?;

        let product = lock_product(&mut *tx, &barcode)
            .await?
            .ok_or_else(|| LedgerError::not_found(&barcode))?;

        if let Some(change) = plan_removal(&product) {
            insert_movement(&mut *tx, &barcode, &change).await?;
        }

        sqlx::query("DELETE FROM products WHERE barcode = $1")
            .bind(&barcode)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(barcode = %barcode, written_off = product.quantity, "Product removed");
        Ok(())
    }

    /// Audit trail of a barcode, newest first.
    ///
    /// History outlives the product, so this also answers for removed
    /// barcodes; an unknown barcode yields an empty list.
    pub async fn movements(&self, barcode: &str) -> AppResult<Vec<StockMovement>> {
        let barcode = checked_barcode(barcode)?;

        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, barcode, movement_type, quantity, previous_quantity, new_quantity,
                   notes, "timestamp"
            FROM stock_movements
            WHERE barcode = $1
            ORDER BY "timestamp" DESC, id
            "#,
        )
        .bind(&barcode)
        .fetch_all(&self.db)
        .await?;

        into_movements(rows)
    }
}
