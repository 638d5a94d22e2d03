//! Local authentication stub.
//!
//! Not real authentication: one account record persisted on the device, a
//! password that is required but never verified, and a demo OAuth flow that
//! fabricates an account for the provider. Suits a storefront demo where the
//! interesting state is the cart and wishlist, not credentials.
//!
//! Signing out removes the stored account entirely, so a later log-in
//! attempt reports no account until the user signs up again.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use versiq_core::{Email, EmailError, OAuthProvider, User, UserId};

use crate::observer::{SubscriberSet, SubscriptionId};
use crate::storage::{StorageBackend, keys};

/// Errors the authentication stub can return.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email and password are both required.
    #[error("email and password are required")]
    MissingCredentials,

    /// The email address is not structurally valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// An account with this email already exists on the device.
    #[error("account already exists, please log in")]
    AccountExists,

    /// No account is stored on the device.
    #[error("no account found, please sign up first")]
    NoAccount,

    /// The stored account does not match the supplied email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account record could not be serialized.
    #[error("could not serialize account: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
}

/// Session identity provider backed by a single locally stored account.
pub struct AuthStore {
    backend: Arc<dyn StorageBackend>,
    current: Option<User>,
    subscribers: SubscriberSet<Option<User>>,
}

impl AuthStore {
    /// Create the store, adopting any account persisted on the device as the
    /// current identity. Unreadable or corrupt data is logged and treated as
    /// an anonymous session.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let current = match Self::load_stored(backend.as_ref()) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "could not read stored user, starting anonymous");
                None
            }
        };
        Self {
            backend,
            current,
            subscribers: SubscriberSet::new(),
        }
    }

    /// The current identity, if signed in.
    #[must_use]
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Register a new account and sign it in.
    ///
    /// The display name defaults to the email local part when omitted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] on empty inputs,
    /// [`AuthError::InvalidEmail`] on a malformed address,
    /// [`AuthError::AccountExists`] when the stored account already uses this
    /// email, and [`AuthError::Storage`] if persistence fails.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &SecretString,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let email = Email::parse(email)?;

        if let Some(existing) = Self::load_stored(self.backend.as_ref())?
            && existing.email == email
        {
            return Err(AuthError::AccountExists);
        }

        let name = match name {
            Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
            _ => email.local_part().to_owned(),
        };
        let user = User {
            id: UserId::generate(),
            email,
            name,
            provider: None,
        };

        self.persist(&user)?;
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    /// Sign in to the account stored on the device.
    ///
    /// Stub semantics: the password is required but never checked against
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] on empty inputs,
    /// [`AuthError::NoAccount`] when nothing is stored, and
    /// [`AuthError::InvalidCredentials`] when the stored email differs.
    pub fn log_in(&mut self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let email = Email::parse(email)?;

        let stored = Self::load_stored(self.backend.as_ref())?.ok_or(AuthError::NoAccount)?;
        if stored.email != email {
            return Err(AuthError::InvalidCredentials);
        }

        self.set_current(Some(stored.clone()));
        Ok(stored)
    }

    /// Sign in through the demo OAuth flow for `provider`.
    ///
    /// Fabricates and stores a `{provider}@versiq-demo.local` account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the account cannot be persisted.
    pub fn sign_in_with_oauth(&mut self, provider: OAuthProvider) -> Result<User, AuthError> {
        let email = Email::parse(&format!("{}@versiq-demo.local", provider.slug()))?;
        let user = User {
            id: UserId::generate(),
            email,
            name: provider.display_name().to_owned(),
            provider: Some(provider),
        };

        self.persist(&user)?;
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    /// Sign out, removing the stored account.
    ///
    /// A storage failure is logged and absorbed; the session still becomes
    /// anonymous.
    pub fn log_out(&mut self) {
        if let Err(error) = self.backend.remove(keys::CURRENT_USER) {
            tracing::warn!(%error, "could not clear stored user on logout");
        }
        self.set_current(None);
    }

    /// Run `callback` after every identity change with the new identity.
    pub fn subscribe(&mut self, callback: impl Fn(&Option<User>) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(callback))
    }

    /// Drop a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // Read the stored account. Corrupt records are logged and treated as
    // absent; storage failures propagate to the caller.
    fn load_stored(backend: &dyn StorageBackend) -> Result<Option<User>, AuthError> {
        let Some(raw) = backend.get(keys::CURRENT_USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                tracing::warn!(%error, "corrupt stored user, treating as absent");
                Ok(None)
            }
        }
    }

    fn persist(&self, user: &User) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(keys::CURRENT_USER, &raw)?;
        Ok(())
    }

    fn set_current(&mut self, user: Option<User>) {
        self.current = user;
        self.subscribers.notify(&self.current);
    }
}
