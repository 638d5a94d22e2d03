//! Durable key-value backing store.
//!
//! The stores treat persistence as one opaque string cell per key, written
//! whole on every mutation. A backend may fail or be absent entirely (quota,
//! disabled storage, poisoned state); the layers above absorb those failures
//! and degrade to in-memory state rather than surfacing them.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use thiserror::Error;

/// Errors a backing store can produce.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A read or write against the backend failed.
    #[error("storage I/O error: {0}")]
    Io(String),
}

/// Synchronous string-keyed persistence.
///
/// Implementations are whole-value: `set` replaces any previous value for the
/// key, and `remove` of an absent key succeeds. No locking primitive is
/// offered; read-modify-write sequences race last-writer-wins across contexts
/// sharing a backend.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys for persisted state.
pub mod keys {
    use versiq_core::UserId;

    /// Key for the guest cart, shared by every identity on the device.
    pub const GUEST_CART: &str = "versiq-cart";

    /// Key for the locally stored user account.
    pub const CURRENT_USER: &str = "versiq_user";

    /// Prefix for identity-scoped wishlist keys.
    pub const WISHLIST_PREFIX: &str = "versiq_wishlist_";

    /// Wishlist key for `user_id`, isolating that user's saved products from
    /// others sharing the device.
    #[must_use]
    pub fn wishlist(user_id: &UserId) -> String {
        format!("{WISHLIST_PREFIX}{user_id}")
    }
}
