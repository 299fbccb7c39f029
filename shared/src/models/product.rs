//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{LedgerError, LedgerResult};
use crate::validation::{
    barcode_text, normalize_optional, parse_price, parse_stock_quantity, supplied,
    validate_barcode,
};

/// Bucket used for products without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A product in the catalog, keyed by barcode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub description: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl Product {
    /// Value of the stock on hand (price × quantity)
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.quantity <= threshold
    }

    /// Category name used for grouping; blank categories fall into
    /// [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED,
        }
    }
}

/// Short form of a product listed in low-stock alerts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LowStockItem {
    pub barcode: String,
    pub name: String,
    pub quantity: i32,
}

impl From<&Product> for LowStockItem {
    fn from(product: &Product) -> Self {
        Self {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
        }
    }
}

/// Registration payload as sent by the scanner UI.
///
/// `price` and `quantity` are kept as raw JSON so that both numbers and
/// numeric strings are accepted; they default to zero when omitted. A
/// barcode may arrive as a JSON number.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterProductInput {
    #[serde(default, deserialize_with = "barcode_text")]
    pub barcode: String,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
    #[validate(length(max = 255, message = "Category must be at most 255 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 255, message = "Supplier must be at most 255 characters"))]
    pub supplier: Option<String>,
    pub description: Option<String>,
}

/// A validated product ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub description: Option<String>,
}

impl RegisterProductInput {
    pub fn into_new_product(self) -> LedgerResult<NewProduct> {
        check_lengths(&self)?;

        let barcode = validate_barcode(&self.barcode)
            .map_err(|msg| LedgerError::invalid("barcode", msg))?;

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| LedgerError::invalid("name", "Name is required"))?
            .to_string();

        let price = match &self.price {
            Some(value) => parse_price(value).map_err(|msg| LedgerError::invalid("price", msg))?,
            None => Decimal::ZERO,
        };
        let quantity = match &self.quantity {
            Some(value) => {
                parse_stock_quantity(value).map_err(|msg| LedgerError::invalid("quantity", msg))?
            }
            None => 0,
        };

        Ok(NewProduct {
            barcode,
            name,
            price,
            quantity,
            category: self.category.and_then(normalize_optional),
            supplier: self.supplier.and_then(normalize_optional),
            description: self.description.and_then(normalize_optional),
        })
    }
}

/// Partial update payload; only supplied fields are changed.
///
/// An explicit `null` clears an optional text field, a missing key leaves
/// it alone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
    #[serde(default, deserialize_with = "supplied")]
    #[validate(length(max = 255, message = "Category must be at most 255 characters"))]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied")]
    #[validate(length(max = 255, message = "Supplier must be at most 255 characters"))]
    pub supplier: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied")]
    pub description: Option<Option<String>>,
}

/// A validated partial update.
///
/// For the optional text fields the outer `Option` says whether the field
/// was supplied, the inner one whether it is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub category: Option<Option<String>>,
    pub supplier: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl UpdateProductInput {
    pub fn into_patch(self) -> LedgerResult<ProductPatch> {
        check_lengths(&self)?;

        let name = match self.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(LedgerError::invalid("name", "Name cannot be empty"));
                }
                Some(name)
            }
            None => None,
        };
        let price = self
            .price
            .as_ref()
            .map(parse_price)
            .transpose()
            .map_err(|msg| LedgerError::invalid("price", msg))?;
        let quantity = self
            .quantity
            .as_ref()
            .map(parse_stock_quantity)
            .transpose()
            .map_err(|msg| LedgerError::invalid("quantity", msg))?;

        Ok(ProductPatch {
            name,
            price,
            quantity,
            category: self.category.map(|c| c.and_then(normalize_optional)),
            supplier: self.supplier.map(|s| s.and_then(normalize_optional)),
            description: self.description.map(|d| d.and_then(normalize_optional)),
        })
    }
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    /// Product with the supplied fields replaced. `last_updated` is left to
    /// the caller.
    pub fn apply(&self, product: &Product) -> Product {
        let mut updated = product.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(price) = self.price {
            updated.price = price;
        }
        if let Some(quantity) = self.quantity {
            updated.quantity = quantity;
        }
        if let Some(category) = &self.category {
            updated.category = category.clone();
        }
        if let Some(supplier) = &self.supplier {
            updated.supplier = supplier.clone();
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        updated
    }
}

/// Turns the first `validator` failure into an `InvalidInput`
fn check_lengths(input: &impl Validate) -> LedgerResult<()> {
    input.validate().map_err(|errors| {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("input".to_string(), "is invalid".to_string()));
        LedgerError::invalid(field, message)
    })
}
