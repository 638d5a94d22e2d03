//! CLI command implementations.
//!
//! Every command operates on an [`AppContext`]: one [`Session`] over the
//! file-backed store in the configured data directory, plus the catalog it
//! was assembled with.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod wishlist;

use std::sync::Arc;

use thiserror::Error;

use versiq_store::{
    AuthError, CatalogError, FileBackend, ProductCatalog, Session, StaticCatalog, StorageError,
};

use crate::config::CliConfig;

/// Demo catalog bundled with the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/products.json");

/// Errors the CLI commands can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The data directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An account operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A referenced product does not exist in the catalog.
    #[error("no product with id {0}")]
    UnknownProduct(i64),

    /// The requested size is not offered for the product.
    #[error("product {product} is not offered in size {size}")]
    InvalidSize { product: i64, size: String },
}

/// The session and catalog every command operates on.
pub struct AppContext {
    pub session: Session,
    pub catalog: Arc<dyn ProductCatalog>,
}

/// Assemble the context from configuration: file-backed storage in the data
/// directory, and either the configured or the bundled catalog.
///
/// # Errors
///
/// Returns [`CommandError::Storage`] if the data directory cannot be opened
/// and [`CommandError::Catalog`] if the catalog cannot be loaded.
pub fn open_context(config: &CliConfig) -> Result<AppContext, CommandError> {
    let backend = Arc::new(FileBackend::open(&config.data_dir)?);
    let catalog: Arc<dyn ProductCatalog> = match &config.catalog_path {
        Some(path) => Arc::new(StaticCatalog::load(path)?),
        None => Arc::new(StaticCatalog::from_json(BUNDLED_CATALOG)?),
    };
    let session = Session::new(backend, Arc::clone(&catalog));
    Ok(AppContext { session, catalog })
}
