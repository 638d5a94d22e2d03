//! Catalog product types.
//!
//! Products are supplied by the catalog collaborator and are read-only from
//! the stores' perspective. Carts snapshot the product at add time, so a
//! later catalog change never rewrites an existing line item.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Whether a product belongs to the current drop or an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arrival {
    New,
    Old,
}

impl Arrival {
    /// Display label for the arrival bucket.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Old => "Old",
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URLs, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available sizes (e.g. "S", "M", "L").
    #[serde(default)]
    pub sizes: Vec<String>,
    pub color: String,
    pub pattern: String,
    pub arrival: Arrival,
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is offered in the given size.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_json() -> &'static str {
        r#"{
            "id": 3,
            "name": "Linen Overshirt",
            "price": "2499.00",
            "images": ["https://cdn.versiq.shop/p/3/front.jpg"],
            "sizes": ["S", "M", "L"],
            "color": "Beige",
            "pattern": "Solid",
            "arrival": "New",
            "category": "Shirts",
            "created_at": "2025-11-03T10:00:00Z"
        }"#
    }

    #[test]
    fn test_product_deserialize() {
        let product: Product = serde_json::from_str(sample_json()).expect("valid product");
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Decimal::new(2_499_00, 2));
        assert_eq!(product.arrival, Arrival::New);
        assert!(product.has_size("M"));
        assert!(!product.has_size("XXL"));
    }

    #[test]
    fn test_product_optional_collections_default_empty() {
        // images/sizes/category may be absent in hand-edited catalogs
        let json = r#"{
            "id": 4,
            "name": "Rib Knit Tee",
            "price": "999.00",
            "color": "White",
            "pattern": "Solid",
            "arrival": "Old",
            "created_at": "2025-01-12T08:30:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).expect("valid product");
        assert!(product.images.is_empty());
        assert!(product.sizes.is_empty());
        assert!(product.category.is_empty());
    }

    #[test]
    fn test_arrival_labels() {
        assert_eq!(Arrival::New.label(), "New");
        assert_eq!(Arrival::Old.label(), "Old");
    }
}
