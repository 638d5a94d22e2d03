//! Session composition root.
//!
//! Owns the identity provider and both stores behind one injected backend
//! and catalog, and runs the merge-on-login reaction: a genuine
//! anonymous-to-identified transition folds the guest cart into the
//! signed-in session exactly once, regardless of which views are mounted or
//! how many observers fire. Identified-to-identified and
//! identified-to-anonymous transitions never merge.

use std::sync::Arc;

use secrecy::SecretString;

use versiq_core::{OAuthProvider, Product, ProductId, User};

use crate::auth::{AuthError, AuthStore};
use crate::cart::CartStore;
use crate::catalog::ProductCatalog;
use crate::storage::StorageBackend;
use crate::wishlist::WishlistStore;

/// One browsing session: identity plus cart and wishlist state.
///
/// Constructed explicitly and passed by reference to consumers; nothing here
/// is a process-wide singleton.
pub struct Session {
    auth: AuthStore,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl Session {
    /// Assemble a session over one backing store and catalog.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            auth: AuthStore::new(Arc::clone(&backend)),
            cart: CartStore::new(Arc::clone(&backend)),
            wishlist: WishlistStore::new(backend, catalog),
        }
    }

    /// The identity provider.
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// The identity provider, for registering identity-change subscribers.
    pub fn auth_mut(&mut self) -> &mut AuthStore {
        &mut self.auth
    }

    /// The cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The cart store, for mutations.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// The wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// The wishlist store, for mutations against an explicit identity.
    pub fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// The current identity, if signed in.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.auth.current()
    }

    /// Register a new account, sign it in, and fold in the guest cart.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthError`] from the identity provider; the guest cart is
    /// left untouched on failure.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &SecretString,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let was_anonymous = self.auth.current().is_none();
        let user = self.auth.sign_up(email, password, name)?;
        self.react_to_sign_in(was_anonymous);
        Ok(user)
    }

    /// Sign in to the stored account and fold in the guest cart.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthError`] from the identity provider; the guest cart is
    /// left untouched on failure.
    pub fn log_in(&mut self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let was_anonymous = self.auth.current().is_none();
        let user = self.auth.log_in(email, password)?;
        self.react_to_sign_in(was_anonymous);
        Ok(user)
    }

    /// Sign in through the demo OAuth flow and fold in the guest cart.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthError`] from the identity provider.
    pub fn sign_in_with_oauth(&mut self, provider: OAuthProvider) -> Result<User, AuthError> {
        let was_anonymous = self.auth.current().is_none();
        let user = self.auth.sign_in_with_oauth(provider)?;
        self.react_to_sign_in(was_anonymous);
        Ok(user)
    }

    /// Sign out. The cart stays as-is (it is shared across identities).
    pub fn log_out(&mut self) {
        self.auth.log_out();
    }

    /// Toggle a product on the current user's wishlist.
    ///
    /// Anonymous sessions get the wishlist store's no-op behavior.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        let user = self.auth.current().map(|user| user.id);
        self.wishlist.toggle(user.as_ref(), product_id)
    }

    /// Whether the current user has saved this product.
    #[must_use]
    pub fn is_wishlisted(&self, product_id: ProductId) -> bool {
        let user = self.auth.current().map(|user| user.id);
        self.wishlist.is_wishlisted(user.as_ref(), product_id)
    }

    /// The current user's saved products, joined against the catalog.
    #[must_use]
    pub fn wishlist_products(&self) -> Vec<Product> {
        let user = self.auth.current().map(|user| user.id);
        self.wishlist.list(user.as_ref())
    }

    // Merge only on a genuine anonymous-to-identified transition.
    fn react_to_sign_in(&mut self, was_anonymous: bool) {
        if was_anonymous && self.auth.current().is_some() {
            self.cart.merge_guest_cart();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::storage::{MemoryBackend, keys};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use versiq_core::Arrival;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(799, 0),
            images: Vec::new(),
            sizes: vec!["L".to_owned()],
            color: "Green".to_owned(),
            pattern: "Solid".to_owned(),
            arrival: Arrival::New,
            category: "Tees".to_owned(),
            created_at: Utc::now(),
        }
    }

    fn session_over(backend: &Arc<dyn StorageBackend>) -> Session {
        let catalog = Arc::new(StaticCatalog::new(vec![product(5), product(6)]));
        Session::new(Arc::clone(backend), catalog)
    }

    fn password() -> SecretString {
        SecretString::from("whatever")
    }

    #[test]
    fn test_sign_up_merges_guest_cart_once() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let mut session = session_over(&backend);

        session.cart_mut().add_to_cart(&product(5), "L", 1);
        session
            .sign_up("asha@example.com", &password(), None)
            .expect("sign up");

        assert_eq!(session.cart().items().len(), 1);
        assert_eq!(session.cart().items().first().map(|l| l.quantity), Some(1));
        assert_eq!(backend.get(keys::GUEST_CART).expect("get"), None);
    }

    #[test]
    fn test_redundant_merge_after_sign_in_changes_nothing() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let mut session = session_over(&backend);

        session.cart_mut().add_to_cart(&product(5), "L", 1);
        session
            .sign_up("asha@example.com", &password(), None)
            .expect("sign up");

        // An identity observer firing again for the same transition.
        session.cart_mut().merge_guest_cart();

        assert_eq!(session.cart().items().len(), 1);
        assert_eq!(session.cart().items().first().map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_identified_log_in_does_not_remerge() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let mut session = session_over(&backend);

        session
            .sign_up("asha@example.com", &password(), None)
            .expect("sign up");
        session.cart_mut().add_to_cart(&product(5), "L", 2);

        // Logging in again while already identified must not touch the cart.
        session
            .log_in("asha@example.com", &password())
            .expect("log in");

        assert_eq!(session.cart().items().first().map(|l| l.quantity), Some(2));
        assert!(backend.get(keys::GUEST_CART).expect("get").is_some());
    }

    #[test]
    fn test_failed_log_in_leaves_guest_cart_alone() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let mut session = session_over(&backend);

        session.cart_mut().add_to_cart(&product(5), "L", 1);
        assert!(session.log_in("nobody@example.com", &password()).is_err());

        assert!(backend.get(keys::GUEST_CART).expect("get").is_some());
        assert_eq!(session.cart().items().len(), 1);
    }

    #[test]
    fn test_wishlist_follows_current_identity() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let mut session = session_over(&backend);

        // Anonymous: wishlist is a no-op.
        assert!(!session.toggle_wishlist(ProductId::new(5)));
        assert!(session.wishlist_products().is_empty());

        session
            .sign_up("asha@example.com", &password(), None)
            .expect("sign up");
        assert!(session.toggle_wishlist(ProductId::new(5)));
        assert!(session.is_wishlisted(ProductId::new(5)));

        // Signing out hides the saved set without deleting it.
        let user_id = session.current_user().map(|u| u.id).expect("signed in");
        session.log_out();
        assert!(!session.is_wishlisted(ProductId::new(5)));
        assert!(
            session
                .wishlist()
                .is_wishlisted(Some(&user_id), ProductId::new(5))
        );
    }

    #[test]
    fn test_oauth_sign_in_merges_guest_cart() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let mut session = session_over(&backend);

        session.cart_mut().add_to_cart(&product(6), "L", 3);
        session
            .sign_in_with_oauth(OAuthProvider::Google)
            .expect("oauth");

        assert_eq!(session.cart().items().first().map(|l| l.quantity), Some(3));
        assert_eq!(backend.get(keys::GUEST_CART).expect("get"), None);
    }
}
