//! Cart line-item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Derive the deterministic cart line id for a (product, size) pair.
///
/// A `(product_id, size)` pair maps to at most one line item, and this id is
/// its uniqueness key.
#[must_use]
pub fn cart_item_id(product_id: ProductId, size: &str) -> String {
    format!("{product_id}-{size}")
}

/// One (product, size) pairing with a quantity in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Uniqueness key, derived from the product id and size.
    pub cart_item_id: String,
    pub product_id: ProductId,
    pub size: String,
    /// Always at least 1; a mutation that would reach 0 removes the line.
    pub quantity: u32,
    /// Unit price captured when the line was first added. Repeat adds keep
    /// this price even if the catalog price has moved since.
    pub price_at_add: Decimal,
    /// Product snapshot captured at first add.
    pub product: Product,
}

impl CartLineItem {
    /// Build a fresh line item from a product, size, and quantity.
    #[must_use]
    pub fn new(product: &Product, size: &str, quantity: u32) -> Self {
        Self {
            cart_item_id: cart_item_id(product.id, size),
            product_id: product.id,
            size: size.to_owned(),
            quantity,
            price_at_add: product.price,
            product: product.clone(),
        }
    }

    /// Line subtotal: captured unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price_at_add * Decimal::from(self.quantity)
    }
}
