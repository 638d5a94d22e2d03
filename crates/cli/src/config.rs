//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VERSIQ_DATA_DIR` - Directory for durable session state (default: `.versiq`)
//! - `VERSIQ_CATALOG` - Path to a catalog JSON file overriding the bundled demo catalog

use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the durable session state.
    pub data_dir: PathBuf,
    /// Catalog file overriding the bundled demo catalog.
    pub catalog_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os("VERSIQ_DATA_DIR")
            .map_or_else(|| PathBuf::from(".versiq"), PathBuf::from);
        let catalog_path = std::env::var_os("VERSIQ_CATALOG").map(PathBuf::from);
        Self {
            data_dir,
            catalog_path,
        }
    }
}
