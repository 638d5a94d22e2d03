//! Product catalog collaborator.
//!
//! The catalog is read-only reference data: a static product array bundled
//! with the application or loaded from disk at startup. The stores look
//! products up here and never mutate it. Filtering is a single linear
//! predicate scan followed by a sort - the catalog is small enough that
//! nothing cleverer earns its keep.

use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use versiq_core::{Arrival, Product, ProductId};

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(String),

    /// The catalog JSON did not parse as a product array.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only product lookup.
pub trait ProductCatalog: Send + Sync {
    /// Look up a product by id.
    fn find(&self, id: ProductId) -> Option<Product>;

    /// All products, catalog order.
    fn list(&self) -> Vec<Product>;
}

/// Catalog backed by a static product array.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Build a catalog from an already-parsed product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON product array.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON is not a product array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Load a JSON product array from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if its contents are not a product array.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(
            count = catalog.products.len(),
            path = %path.display(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for StaticCatalog {
    fn find(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn list(&self) -> Vec<Product> {
        self.products.clone()
    }
}

/// Sort order for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    Newest,
    /// Price low to high.
    PriceAsc,
    /// Price high to low.
    PriceDesc,
}

/// Linear filter over the catalog.
///
/// An empty selection within a facet matches everything, so the default
/// query returns the whole catalog sorted newest-first.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Patterns to keep (e.g. "Solid", "Striped").
    pub patterns: Vec<String>,
    /// Colors to keep.
    pub colors: Vec<String>,
    /// Arrival buckets to keep.
    pub arrivals: Vec<Arrival>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Whether `product` passes every selected facet.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_pattern =
            self.patterns.is_empty() || self.patterns.iter().any(|p| *p == product.pattern);
        let matches_color =
            self.colors.is_empty() || self.colors.iter().any(|c| *c == product.color);
        let matches_arrival = self.arrivals.is_empty() || self.arrivals.contains(&product.arrival);
        let matches_search = self.search.as_ref().is_none_or(|term| {
            product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        let matches_min = self.min_price.is_none_or(|min| product.price >= min);
        let matches_max = self.max_price.is_none_or(|max| product.price <= max);

        matches_pattern
            && matches_color
            && matches_arrival
            && matches_search
            && matches_min
            && matches_max
    }

    /// Run the query: one scan over `catalog.list()`, then sort.
    #[must_use]
    pub fn run(&self, catalog: &dyn ProductCatalog) -> Vec<Product> {
        let mut results: Vec<Product> = catalog
            .list()
            .into_iter()
            .filter(|p| self.matches(p))
            .collect();

        match self.sort {
            SortOrder::PriceAsc => results.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Newest => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        results
    }
}
