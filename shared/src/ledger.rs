//! Stock arithmetic for receipts, sales and adjustments
//!
//! These functions decide *what* a mutation writes; the backend applies the
//! result inside a single database transaction. Keeping the rules here means
//! the audit invariant (current quantity equals the sum of all movement
//! deltas for a barcode) can be checked without a database.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{MovementType, Product, StockMovement};

/// A planned quantity change and the audit snapshot that goes with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockChange {
    pub movement_type: MovementType,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    /// Signed delta, `new_quantity - previous_quantity`
    pub delta: i32,
    pub notes: String,
}

/// Everything a sale writes besides the movement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePlan {
    pub change: StockChange,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

fn ensure_positive(quantity: i32) -> LedgerResult<()> {
    if quantity <= 0 {
        return Err(LedgerError::invalid(
            "quantity",
            "Quantity must be greater than 0",
        ));
    }
    Ok(())
}

/// Plan a goods receipt of `quantity` units for `product`
pub fn plan_receive(product: &Product, quantity: i32) -> LedgerResult<StockChange> {
    ensure_positive(quantity)?;

    let new_quantity = product
        .quantity
        .checked_add(quantity)
        .ok_or_else(|| LedgerError::invalid("quantity", "Resulting stock level is too large"))?;

    Ok(StockChange {
        movement_type: MovementType::Receive,
        previous_quantity: product.quantity,
        new_quantity,
        delta: quantity,
        notes: format!("Received {} units", quantity),
    })
}

/// Plan the sale of `quantity` units of `product` at its current price.
///
/// Fails with `InsufficientStock` when the product holds fewer units than
/// requested; nothing is planned in that case.
pub fn plan_sale(product: &Product, quantity: i32) -> LedgerResult<SalePlan> {
    ensure_positive(quantity)?;

    if product.quantity < quantity {
        return Err(LedgerError::InsufficientStock {
            barcode: product.barcode.clone(),
            available: product.quantity,
            requested: quantity,
        });
    }

    let new_quantity = product.quantity - quantity;
    Ok(SalePlan {
        change: StockChange {
            movement_type: MovementType::Sale,
            previous_quantity: product.quantity,
            new_quantity,
            delta: -quantity,
            notes: format!("Sale of {} units", quantity),
        },
        quantity,
        unit_price: product.price,
        total: product.price * Decimal::from(quantity),
    })
}

/// Plan the adjustment that moves stock from `previous` to `target`.
///
/// Returns `None` when the level does not change, since a zero-delta
/// movement carries no information.
pub fn plan_adjustment(previous: i32, target: i32, notes: &str) -> Option<StockChange> {
    if previous == target {
        return None;
    }
    Some(StockChange {
        movement_type: MovementType::Adjustment,
        previous_quantity: previous,
        new_quantity: target,
        delta: target - previous,
        notes: notes.to_string(),
    })
}

/// Opening balance for a freshly registered product
pub fn plan_initial_stock(quantity: i32) -> Option<StockChange> {
    plan_adjustment(0, quantity, "Initial stock")
}

/// Closing movement written when a product is removed from the catalog
pub fn plan_removal(product: &Product) -> Option<StockChange> {
    plan_adjustment(product.quantity, 0, "Product removed from catalog")
}

/// Sum of all movement deltas.
///
/// For the full movement history of one barcode this equals the product's
/// current quantity (or zero once the product has been removed).
pub fn reconcile<'a>(movements: impl IntoIterator<Item = &'a StockMovement>) -> i64 {
    movements.into_iter().map(|m| i64::from(m.quantity)).sum()
}
