//! Stock ledger tests
//!
//! Tests for the in-memory ledger rules including:
//! - Movement history always reconciles to the current stock level
//! - Rejected sales leave stock untouched
//! - Inventory report totals and low-stock detection

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    plan_adjustment, plan_initial_stock, plan_receive, plan_removal, plan_sale, reconcile,
    DashboardStats, DateRange, InventoryReport, LedgerError, MovementType, Product, Sale,
    SalesReport, StockChange, StockMovement, LOW_STOCK_THRESHOLD,
};
use std::str::FromStr;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(barcode: &str, price: &str, quantity: i32, category: Option<&str>) -> Product {
    Product {
        barcode: barcode.to_string(),
        name: format!("Item {}", barcode),
        price: dec(price),
        quantity,
        category: category.map(str::to_string),
        supplier: None,
        description: None,
        last_updated: Utc::now(),
    }
}

fn record(barcode: &str, change: &StockChange) -> StockMovement {
    StockMovement {
        id: Uuid::new_v4(),
        barcode: barcode.to_string(),
        movement_type: change.movement_type,
        quantity: change.delta,
        previous_quantity: change.previous_quantity,
        new_quantity: change.new_quantity,
        notes: Some(change.notes.clone()),
        timestamp: Utc::now(),
    }
}

fn sale_at(quantity: i32, price: &str, timestamp: chrono::DateTime<Utc>) -> Sale {
    let price = dec(price);
    Sale {
        id: Uuid::new_v4(),
        barcode: "123".to_string(),
        product_name: "Milk".to_string(),
        quantity,
        price,
        total: price * Decimal::from(quantity),
        timestamp,
    }
}

/// Operations a clerk can perform against one product
#[derive(Debug, Clone)]
enum Op {
    Receive(i32),
    Sell(i32),
    SetQuantity(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i32..500).prop_map(Op::Receive),
        (1i32..200).prop_map(Op::Sell),
        (0i32..1000).prop_map(Op::SetQuantity),
    ]
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Receive 10 onto 5, then sell 3 at 2.50
    #[test]
    fn test_receive_then_sell() {
        let mut widget = product("123", "2.50", 5, None);
        widget.name = "Widget".to_string();

        let receipt = plan_receive(&widget, 10).unwrap();
        assert_eq!(receipt.new_quantity, 15);
        assert_eq!(receipt.movement_type, MovementType::Receive);
        widget.quantity = receipt.new_quantity;

        let sale = plan_sale(&widget, 3).unwrap();
        assert_eq!(sale.total, dec("7.50"));
        assert_eq!(sale.unit_price, dec("2.50"));
        assert_eq!(sale.change.movement_type, MovementType::Sale);
        assert_eq!(sale.change.delta, -3);
        assert_eq!(sale.change.previous_quantity, 15);
        assert_eq!(sale.change.new_quantity, 12);
    }

    /// Selling more than is on hand is rejected with both numbers
    #[test]
    fn test_oversell_rejected() {
        let widget = product("123", "2.50", 4, None);

        match plan_sale(&widget, 5) {
            Err(LedgerError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 4);
                assert_eq!(requested, 5);
            }
            other => panic!("expected insufficient stock, got {:?}", other),
        }
        assert_eq!(widget.quantity, 4);
    }

    /// Selling exactly the stock on hand empties it
    #[test]
    fn test_sell_entire_stock() {
        let milk = product("123", "1.00", 4, None);
        let sale = plan_sale(&milk, 4).unwrap();
        assert_eq!(sale.change.new_quantity, 0);
    }

    /// Zero and negative quantities are invalid input
    #[test]
    fn test_non_positive_quantities() {
        let milk = product("123", "1.00", 4, None);
        assert!(matches!(
            plan_receive(&milk, 0),
            Err(LedgerError::InvalidInput { .. })
        ));
        assert!(matches!(
            plan_sale(&milk, -1),
            Err(LedgerError::InvalidInput { .. })
        ));
    }

    /// Register, adjust and delete write reconciling adjustments
    #[test]
    fn test_lifecycle_reconciles_to_zero() {
        let mut movements = Vec::new();
        let mut milk = product("123", "2.50", 0, None);

        let opening = plan_initial_stock(5).unwrap();
        movements.push(record("123", &opening));
        milk.quantity = opening.new_quantity;

        let edit = plan_adjustment(milk.quantity, 8, "Quantity edited").unwrap();
        assert_eq!(edit.delta, 3);
        movements.push(record("123", &edit));
        milk.quantity = edit.new_quantity;

        let removal = plan_removal(&milk).unwrap();
        movements.push(record("123", &removal));

        assert_eq!(reconcile(&movements), 0);
    }

    /// No movement is written for a product registered with zero stock
    #[test]
    fn test_zero_opening_balance() {
        assert!(plan_initial_stock(0).is_none());
        assert!(plan_adjustment(7, 7, "unchanged").is_none());
    }

    /// Inventory report for the two-product catalog
    #[test]
    fn test_inventory_report() {
        let products = vec![
            product("A", "2.00", 3, Some("Dairy")),
            product("B", "10.00", 20, None),
        ];

        let report = InventoryReport::build(&products, LOW_STOCK_THRESHOLD);
        assert_eq!(report.total_products, 2);
        assert_eq!(report.total_value, dec("206.00"));
        assert_eq!(report.low_stock_items.len(), 1);
        assert_eq!(report.low_stock_items[0].barcode, "A");
        assert_eq!(report.categories["Dairy"].count, 1);
        assert_eq!(report.categories["Dairy"].value, dec("6.00"));
        assert_eq!(report.categories["Uncategorized"].count, 1);
        assert_eq!(report.categories["Uncategorized"].value, dec("200.00"));
    }

    /// Exactly ten units counts as low stock
    #[test]
    fn test_low_stock_threshold_inclusive() {
        assert!(product("A", "1.00", 10, None).is_low_stock(LOW_STOCK_THRESHOLD));
        assert!(!product("A", "1.00", 11, None).is_low_stock(LOW_STOCK_THRESHOLD));
    }

    /// Today's bucket and the seven-day window
    #[test]
    fn test_sales_report_buckets() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let window = DateRange::trailing_days(today, 7);

        let sales = vec![
            sale_at(2, "1.50", noon),
            sale_at(1, "4.00", noon - Duration::days(3)),
            sale_at(5, "1.00", noon - Duration::days(6)),
        ];

        let report = SalesReport::build(&sales, sales.clone(), today, window);
        assert_eq!(report.today.count, 1);
        assert_eq!(report.today.total, dec("3.00"));
        assert_eq!(report.week.count, 3);
        assert_eq!(report.week.total, dec("12.00"));
        assert_eq!(report.recent_sales.len(), 3);
    }

    /// Dashboard shows at most five low-stock items
    #[test]
    fn test_dashboard_low_stock_list_truncated() {
        let products: Vec<Product> = (0..8)
            .map(|i| product(&format!("P{}", i), "1.00", i, None))
            .collect();

        let stats = DashboardStats::build(&products, 4, LOW_STOCK_THRESHOLD);
        assert_eq!(stats.total_products, 8);
        assert_eq!(stats.low_stock_count, 8);
        assert_eq!(stats.low_stock_items.len(), 5);
        assert_eq!(stats.total_sales_today, 4);
        assert_eq!(stats.total_inventory_value, dec("28.00"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Movement history always sums to the current stock level
        #[test]
        fn prop_movements_reconcile(
            opening in 0i32..1000,
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let mut item = product("999", "3.25", 0, None);
            let mut movements = Vec::new();

            if let Some(change) = plan_initial_stock(opening) {
                movements.push(record(&item.barcode, &change));
                item.quantity = change.new_quantity;
            }

            for op in ops {
                let change = match op {
                    Op::Receive(q) => plan_receive(&item, q).ok(),
                    Op::Sell(q) => plan_sale(&item, q).ok().map(|plan| plan.change),
                    Op::SetQuantity(q) => plan_adjustment(item.quantity, q, "Quantity edited"),
                };
                if let Some(change) = change {
                    prop_assert_eq!(change.previous_quantity, item.quantity);
                    prop_assert_eq!(change.new_quantity, change.previous_quantity + change.delta);
                    movements.push(record(&item.barcode, &change));
                    item.quantity = change.new_quantity;
                }
                prop_assert!(item.quantity >= 0);
            }

            prop_assert_eq!(reconcile(&movements), i64::from(item.quantity));
        }

        /// A sale beyond stock is rejected and changes nothing
        #[test]
        fn prop_oversell_is_rejected(stock in 0i32..500, extra in 1i32..500) {
            let item = product("999", "1.00", stock, None);
            let before = item.clone();

            let result = plan_sale(&item, stock + extra);
            let is_insufficient = matches!(result, Err(LedgerError::InsufficientStock { .. }));
            prop_assert!(is_insufficient);
            prop_assert_eq!(item, before);
        }

        /// Sale total is price times quantity
        #[test]
        fn prop_sale_total(cents in 0i64..1_000_000, stock in 1i32..1000, sell in 1i32..1000) {
            prop_assume!(sell <= stock);
            let mut item = product("999", "0", stock, None);
            item.price = Decimal::new(cents, 2);

            let plan = plan_sale(&item, sell).unwrap();
            prop_assert_eq!(plan.total, item.price * Decimal::from(sell));
            prop_assert_eq!(plan.change.new_quantity, stock - sell);
        }

        /// Total inventory value is the sum of price times quantity
        #[test]
        fn prop_inventory_value(
            items in prop::collection::vec((0i64..100_000, 0i32..1000), 0..30),
        ) {
            let products: Vec<Product> = items
                .iter()
                .enumerate()
                .map(|(i, (cents, qty))| {
                    let mut p = product(&format!("B{}", i), "0", *qty, None);
                    p.price = Decimal::new(*cents, 2);
                    p
                })
                .collect();

            let expected: Decimal = products
                .iter()
                .map(|p| p.price * Decimal::from(p.quantity))
                .sum();
            let report = InventoryReport::build(&products, LOW_STOCK_THRESHOLD);

            prop_assert_eq!(report.total_value, expected);
            prop_assert_eq!(report.total_products, products.len() as i64);
            let low = products.iter().filter(|p| p.quantity <= LOW_STOCK_THRESHOLD).count();
            prop_assert_eq!(report.low_stock_items.len(), low);
        }
    }
}
