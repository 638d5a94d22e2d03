//! Cart store.
//!
//! Owns the authoritative cart for the session and mirrors it to the backing
//! store on every mutation. The durable value is the whole serialized cart,
//! so writes are idempotent and the stored value always reflects the
//! in-memory state at the time of the write.
//!
//! The cart lives under one fixed key shared by every identity on the device,
//! while wishlists are identity-scoped. Two people signing in on the same
//! device therefore see the same cart; [`CartStore::merge_guest_cart`] covers
//! how guest items fold in at sign-in.

use std::sync::Arc;

use rust_decimal::Decimal;

use versiq_core::{CartLineItem, Product, cart_item_id};

use crate::observer::{SubscriberSet, SubscriptionId};
use crate::storage::{StorageBackend, keys};

/// Item count and subtotal for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub total_items: u32,
    /// Sum of captured unit price times quantity, per line.
    pub subtotal: Decimal,
}

/// Order summary for the checkout view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Authoritative cart state, mirrored to durable storage on every mutation.
pub struct CartStore {
    backend: Arc<dyn StorageBackend>,
    items: Vec<CartLineItem>,
    subscribers: SubscriberSet<[CartLineItem]>,
}

impl CartStore {
    /// Create the store, adopting the persisted cart if present and valid.
    ///
    /// Unreadable or corrupt data is logged and absorbed; the store starts
    /// empty rather than failing.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let items = match backend.get(keys::GUEST_CART) {
            Ok(Some(raw)) => parse_cart(&raw),
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "could not read persisted cart, starting empty");
                Vec::new()
            }
        };
        Self {
            backend,
            items,
            subscribers: SubscriberSet::new(),
        }
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of a product in `size` to the cart.
    ///
    /// An existing line for the same (product, size) pair has its quantity
    /// incremented and keeps the price captured at first add; otherwise a new
    /// line is appended. A zero quantity is ignored.
    ///
    /// Size membership in `product.sizes` is deliberately not checked here;
    /// that validation belongs to the input surface.
    pub fn add_to_cart(&mut self, product: &Product, size: &str, quantity: u32) {
        if quantity == 0 {
            tracing::debug!(product_id = %product.id, "ignoring add with zero quantity");
            return;
        }

        let id = cart_item_id(product.id, size);
        if let Some(line) = self.items.iter_mut().find(|line| line.cart_item_id == id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem::new(product, size, quantity));
        }

        self.persist();
        self.subscribers.notify(&self.items);
    }

    /// Remove the line with `cart_item_id`. Absent ids are a silent no-op.
    pub fn remove_from_cart(&mut self, cart_item_id: &str) {
        let before = self.items.len();
        self.items.retain(|line| line.cart_item_id != cart_item_id);
        if self.items.len() == before {
            return;
        }

        self.persist();
        self.subscribers.notify(&self.items);
    }

    /// Set the quantity for a line, absolute. Zero behaves exactly like
    /// [`Self::remove_from_cart`]; an absent id is a silent no-op.
    pub fn update_quantity(&mut self, cart_item_id: &str, new_quantity: u32) {
        if new_quantity == 0 {
            self.remove_from_cart(cart_item_id);
            return;
        }

        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.cart_item_id == cart_item_id)
        else {
            return;
        };
        line.quantity = new_quantity;

        self.persist();
        self.subscribers.notify(&self.items);
    }

    /// Empty the cart and persist the empty sequence.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.subscribers.notify(&self.items);
    }

    /// Fold the persisted guest cart into this store at sign-in.
    ///
    /// The guest bucket is deleted *before* its entries are applied, so a
    /// repeated invocation (an identity observer firing twice for one
    /// transition) finds an empty bucket and changes nothing, and quantities
    /// are never double-counted. Entries are deduplicated with the same
    /// increment-on-duplicate rule as [`Self::add_to_cart`]. The merged cart
    /// is persisted by the next ordinary mutation rather than here, leaving
    /// the bucket empty once the merge completes.
    pub fn merge_guest_cart(&mut self) {
        let raw = match self.backend.get(keys::GUEST_CART) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "could not read guest cart for merge");
                return;
            }
        };

        if let Err(error) = self.backend.remove(keys::GUEST_CART) {
            tracing::warn!(%error, "could not clear guest cart bucket");
        }

        let entries = parse_cart(&raw);
        if entries.is_empty() {
            return;
        }

        let mut merged: Vec<CartLineItem> = Vec::new();
        for entry in entries {
            if let Some(line) = merged
                .iter_mut()
                .find(|line| line.cart_item_id == entry.cart_item_id)
            {
                line.quantity = line.quantity.saturating_add(entry.quantity);
            } else {
                merged.push(entry);
            }
        }

        tracing::info!(lines = merged.len(), "guest cart merged at sign-in");
        self.items = merged;
        self.subscribers.notify(&self.items);
    }

    /// Item count and subtotal for the current cart.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            total_items: self.items.iter().map(|line| line.quantity).sum(),
            subtotal: self.items.iter().map(CartLineItem::line_total).sum(),
        }
    }

    /// Order summary with a flat shipping fee added to the subtotal.
    #[must_use]
    pub fn checkout_summary(&self, shipping: Decimal) -> CheckoutSummary {
        let subtotal = self.totals().subtotal;
        CheckoutSummary {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Run `callback` after every successful mutation with the new cart.
    pub fn subscribe(&mut self, callback: impl Fn(&[CartLineItem]) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(callback))
    }

    /// Drop a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // Overwrite the durable cart key with the serialized current cart.
    // Failures are logged and absorbed: the in-memory cart has already
    // changed and the caller is never blocked on persistence.
    fn persist(&self) {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::error!(%error, "cart serialization failed, skipping persist");
                return;
            }
        };
        if let Err(error) = self.backend.set(keys::GUEST_CART, &raw) {
            tracing::warn!(%error, "cart persist failed, continuing in memory");
        }
    }
}

// Parse a persisted cart, absorbing corrupt data into an empty cart.
fn parse_cart(raw: &str) -> Vec<CartLineItem> {
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(%error, "corrupt persisted cart, falling back to empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBackend, StorageError};
    use chrono::Utc;
    use versiq_core::{Arrival, ProductId};

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            images: Vec::new(),
            sizes: vec!["M".to_owned(), "L".to_owned()],
            color: "Black".to_owned(),
            pattern: "Solid".to_owned(),
            arrival: Arrival::New,
            category: "Tees".to_owned(),
            created_at: Utc::now(),
        }
    }

    fn store() -> (CartStore, Arc<dyn StorageBackend>) {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let store = CartStore::new(Arc::clone(&backend));
        (store, backend)
    }

    #[test]
    fn test_add_same_pair_increments_single_line() {
        let (mut cart, _) = store();
        let p = product(1, 999);

        cart.add_to_cart(&p, "M", 2);
        cart.add_to_cart(&p, "M", 1);

        assert_eq!(cart.items().len(), 1);
        let line = cart.items().first().expect("one line");
        assert_eq!(line.cart_item_id, "1-M");
        assert_eq!(line.quantity, 3);
    }

    #[test]
    fn test_sizes_are_distinct_lines() {
        let (mut cart, _) = store();
        let p = product(1, 999);

        cart.add_to_cart(&p, "M", 1);
        cart.add_to_cart(&p, "L", 1);

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_repeat_add_keeps_captured_price() {
        let (mut cart, _) = store();
        let mut p = product(1, 999);

        cart.add_to_cart(&p, "M", 1);
        p.price = Decimal::new(1_499, 0);
        cart.add_to_cart(&p, "M", 1);

        let line = cart.items().first().expect("one line");
        assert_eq!(line.price_at_add, Decimal::new(999, 0));
        assert_eq!(line.product.price, Decimal::new(999, 0));
    }

    #[test]
    fn test_zero_quantity_add_is_ignored() {
        let (mut cart, backend) = store();
        cart.add_to_cart(&product(1, 999), "M", 0);
        assert!(cart.is_empty());
        assert_eq!(backend.get(keys::GUEST_CART).expect("get"), None);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let (mut cart, _) = store();
        cart.add_to_cart(&product(1, 999), "M", 2);
        cart.update_quantity("1-M", 5);
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let (mut cart, _) = store();
        cart.add_to_cart(&product(1, 999), "M", 4);
        cart.update_quantity("1-M", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let (mut cart, _) = store();
        cart.add_to_cart(&product(1, 999), "M", 1);
        cart.remove_from_cart("9-XL");
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_concrete_add_update_scenario() {
        let (mut cart, _) = store();
        let p = product(1, 999);

        cart.add_to_cart(&p, "M", 2);
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(2));

        cart.add_to_cart(&p, "M", 1);
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(3));

        cart.update_quantity("1-M", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_round_trip_through_backend() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        {
            let mut cart = CartStore::new(Arc::clone(&backend));
            cart.add_to_cart(&product(1, 999), "M", 2);
            cart.add_to_cart(&product(2, 1_499), "S", 1);
        }

        let reloaded = CartStore::new(backend);
        assert_eq!(reloaded.items().len(), 2);
        let ids: Vec<&str> = reloaded
            .items()
            .iter()
            .map(|l| l.cart_item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1-M", "2-S"]);
        assert_eq!(reloaded.items().first().map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_corrupt_persisted_cart_starts_empty() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        backend
            .set(keys::GUEST_CART, "{not json")
            .expect("seed corrupt value");

        let mut cart = CartStore::new(Arc::clone(&backend));
        assert!(cart.is_empty());

        // The store still works after recovery.
        cart.add_to_cart(&product(1, 999), "M", 1);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_merge_folds_bucket_and_empties_it() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        {
            let mut guest = CartStore::new(Arc::clone(&backend));
            guest.add_to_cart(&product(5, 799), "L", 1);
        }

        let mut cart = CartStore::new(Arc::clone(&backend));
        cart.merge_guest_cart();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(1));
        assert_eq!(backend.get(keys::GUEST_CART).expect("get"), None);
    }

    #[test]
    fn test_merge_twice_changes_nothing() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        {
            let mut guest = CartStore::new(Arc::clone(&backend));
            guest.add_to_cart(&product(5, 799), "L", 1);
        }

        let mut cart = CartStore::new(Arc::clone(&backend));
        cart.merge_guest_cart();
        cart.merge_guest_cart();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_merge_deduplicates_bucket_entries() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        // Hand-build a bucket holding the same (product, size) twice, as a
        // previous buggy writer could have left it.
        let p = product(5, 799);
        let twice = vec![
            CartLineItem::new(&p, "L", 1),
            CartLineItem::new(&p, "L", 2),
        ];
        backend
            .set(
                keys::GUEST_CART,
                &serde_json::to_string(&twice).expect("serialize"),
            )
            .expect("seed bucket");

        let mut cart = CartStore::new(Arc::clone(&backend));
        cart.merge_guest_cart();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(3));
    }

    #[test]
    fn test_totals() {
        let (mut cart, _) = store();
        cart.add_to_cart(&product(1, 500), "M", 2);
        cart.add_to_cart(&product(2, 300), "S", 1);

        let totals = cart.totals();
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.subtotal, Decimal::new(1_300, 0));
    }

    #[test]
    fn test_checkout_summary_adds_flat_shipping() {
        let (mut cart, _) = store();
        cart.add_to_cart(&product(1, 500), "M", 1);

        let summary = cart.checkout_summary(Decimal::new(50, 0));
        assert_eq!(summary.subtotal, Decimal::new(500, 0));
        assert_eq!(summary.shipping, Decimal::new(50, 0));
        assert_eq!(summary.total, Decimal::new(550, 0));
    }

    #[test]
    fn test_subscriber_sees_each_mutation() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (mut cart, _) = store();
        let counts: Rc<RefCell<Vec<usize>>> = Rc::default();
        let inner = Rc::clone(&counts);
        cart.subscribe(move |items| inner.borrow_mut().push(items.len()));

        cart.add_to_cart(&product(1, 999), "M", 1);
        cart.add_to_cart(&product(2, 999), "M", 1);
        cart.remove_from_cart("1-M");

        assert_eq!(*counts.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_storage_failure_degrades_to_memory() {
        struct BrokenBackend;

        impl StorageBackend for BrokenBackend {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::Unavailable("disabled".to_owned()))
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Unavailable("disabled".to_owned()))
            }
            fn remove(&self, _key: &str) -> Result<(), StorageError> {
                Err(StorageError::Unavailable("disabled".to_owned()))
            }
        }

        let mut cart = CartStore::new(Arc::new(BrokenBackend));
        cart.add_to_cart(&product(1, 999), "M", 1);
        cart.update_quantity("1-M", 3);

        // In-memory state keeps working for the rest of the session.
        assert_eq!(cart.items().first().map(|l| l.quantity), Some(3));
    }
}
