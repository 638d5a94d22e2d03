//! Wishlist store.
//!
//! A per-user set of saved product ids, persisted whole under an
//! identity-scoped key. Anonymous sessions have no persistence target, so
//! their operations are deliberate no-ops rather than errors - saving
//! favorites is a signed-in feature.
//!
//! Each (identity, product) pair is binary: saved or not, flipped only by
//! [`WishlistStore::toggle`]. An identity switch changes which key is
//! consulted; it never touches another identity's set.

use std::sync::Arc;

use versiq_core::{Product, ProductId, UserId};

use crate::catalog::ProductCatalog;
use crate::observer::{SubscriberSet, SubscriptionId};
use crate::storage::{StorageBackend, keys};

/// Per-identity saved-product set, read through and written back whole.
pub struct WishlistStore {
    backend: Arc<dyn StorageBackend>,
    catalog: Arc<dyn ProductCatalog>,
    subscribers: SubscriberSet<[ProductId]>,
}

impl WishlistStore {
    /// Create the store over a backing store and catalog.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            backend,
            catalog,
            subscribers: SubscriberSet::new(),
        }
    }

    /// Whether `product_id` is saved for `user`. Always false for anonymous.
    #[must_use]
    pub fn is_wishlisted(&self, user: Option<&UserId>, product_id: ProductId) -> bool {
        user.is_some_and(|user| self.read_ids(user).contains(&product_id))
    }

    /// Toggle `product_id` for `user`, returning the new membership.
    ///
    /// Anonymous sessions cannot persist a wishlist (a product rule, not an
    /// oversight): the call returns false and writes no key.
    pub fn toggle(&mut self, user: Option<&UserId>, product_id: ProductId) -> bool {
        let Some(user) = user else {
            return false;
        };

        let mut ids = self.read_ids(user);
        let wishlisted = if let Some(pos) = ids.iter().position(|id| *id == product_id) {
            ids.remove(pos);
            false
        } else {
            ids.push(product_id);
            true
        };

        self.write_ids(user, &ids);
        self.subscribers.notify(&ids);
        wishlisted
    }

    /// Saved product ids for `user`, in the order they were toggled on.
    #[must_use]
    pub fn ids(&self, user: Option<&UserId>) -> Vec<ProductId> {
        user.map(|user| self.read_ids(user)).unwrap_or_default()
    }

    /// Saved products for `user`, joined against the catalog.
    ///
    /// Ids whose product has since left the catalog drop out silently.
    #[must_use]
    pub fn list(&self, user: Option<&UserId>) -> Vec<Product> {
        self.ids(user)
            .into_iter()
            .filter_map(|id| self.catalog.find(id))
            .collect()
    }

    /// Run `callback` after every successful toggle with the new id set.
    pub fn subscribe(&mut self, callback: impl Fn(&[ProductId]) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(callback))
    }

    /// Drop a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // Read the stored id set, treating missing, corrupt, or unreadable data
    // as empty for this operation.
    fn read_ids(&self, user: &UserId) -> Vec<ProductId> {
        match self.backend.get(&keys::wishlist(user)) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(ids) => ids,
                Err(error) => {
                    tracing::warn!(%error, %user, "corrupt persisted wishlist, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, %user, "could not read wishlist, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_ids(&self, user: &UserId, ids: &[ProductId]) {
        let raw = match serde_json::to_string(ids) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::error!(%error, %user, "wishlist serialization failed, skipping persist");
                return;
            }
        };
        if let Err(error) = self.backend.set(&keys::wishlist(user), &raw) {
            tracing::warn!(%error, %user, "wishlist persist failed");
        }
    }
}
