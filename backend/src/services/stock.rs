//! Stock movement recording: goods receipts and sales
//!
//! Both operations lock the product row, plan the change with the ledger
//! rules from `shared`, and write the product update together with its audit
//! records in one transaction. An early return drops the transaction, which
//! rolls back anything already staged.

use shared::{plan_receive, plan_sale, LedgerError, SaleReceipt, StockMovement};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use super::catalog::checked_barcode;
use super::store::{insert_movement, lock_product, set_quantity, SaleRow};
use crate::error::AppResult;

/// Stock service for receipts and sales
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Receive `quantity` units of a registered product.
    ///
    /// Returns the `receive` movement, whose `new_quantity` is the stock
    /// level after the receipt.
    #[instrument(skip(self))]
    pub async fn receive(&self, barcode: &str, quantity: i32) -> AppResult<StockMovement> {
        let barcode = checked_barcode(barcode)?;

        let mut tx = self.db.begin().await?;

        let product = lock_product(&mut *tx, &barcode)
            .await?
            .ok_or_else(|| LedgerError::not_found(&barcode))?;

        let change = plan_receive(&product, quantity)?;

        set_quantity(&mut *tx, &barcode, change.new_quantity).await?;
        let movement = insert_movement(&mut *tx, &barcode, &change).await?;

        tx.commit().await?;

        info!(
            barcode = %barcode,
            quantity,
            new_quantity = change.new_quantity,
            "Stock received"
        );
        Ok(movement)
    }

    /// Sell `quantity` units of a product at its current price.
    ///
    /// Stock is checked against the locked row before anything is written;
    /// a rejected sale leaves no trace.
    #[instrument(skip(self))]
    pub async fn record_sale(&self, barcode: &str, quantity: i32) -> AppResult<SaleReceipt> {
        let barcode = checked_barcode(barcode)?;

        let mut tx = self.db.begin().await?;

        let product = lock_product(&mut *tx, &barcode)
            .await?
            .ok_or_else(|| LedgerError::not_found(&barcode))?;

        let plan = match plan_sale(&product, quantity) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(barcode = %barcode, quantity, available = product.quantity, "Sale rejected");
                return Err(err.into());
            }
        };

        set_quantity(&mut *tx, &barcode, plan.change.new_quantity).await?;

        let sale = sqlx::query_as::<_, SaleRow>(
            r#"
            INSERT INTO sales (barcode, product_name, quantity, price, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, barcode, product_name, quantity, price, total, "timestamp"
            "#,
        )
        .bind(&barcode)
        .bind(&product.name)
        .bind(plan.quantity)
        .bind(plan.unit_price)
        .bind(plan.total)
        .fetch_one(&mut *tx)
        .await?;

        insert_movement(&mut *tx, &barcode, &plan.change).await?;

        tx.commit().await?;

        info!(
            barcode = %barcode,
            quantity,
            total = %plan.total,
            remaining = plan.change.new_quantity,
            "Sale recorded"
        );

        Ok(SaleReceipt {
            sale: sale.into(),
            remaining_stock: plan.change.new_quantity,
        })
    }
}
