//! Versiq Store - Client-side commerce state layer.
//!
//! Owns the authoritative cart, the per-user wishlist, and the local session
//! identity, mirroring each to a durable key-value backing store on every
//! mutation. The presentation layer (CLI, UI shell) is a pure subscriber: it
//! invokes the mutation operations here and re-renders from the state these
//! stores expose, holding no copy of its own.
//!
//! # Modules
//!
//! - [`storage`] - Durable key-value backing store trait and backends
//! - [`catalog`] - Read-only product catalog plus linear filtering/sorting
//! - [`auth`] - Local-account session identity stub
//! - [`cart`] - Authoritative cart with merge-on-login
//! - [`wishlist`] - Per-identity saved-product set
//! - [`session`] - Composition root wiring the stores to identity changes
//!
//! # Consistency model
//!
//! Every operation is synchronous and runs on the caller's thread; nothing
//! here blocks or suspends. The backing store is shared across execution
//! contexts with no change notification, so concurrent contexts converge
//! last-writer-wins at the granularity of a whole-value overwrite. Each
//! context stays internally consistent; cross-context divergence is accepted.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod observer;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use auth::{AuthError, AuthStore};
pub use cart::{CartStore, CartTotals, CheckoutSummary};
pub use catalog::{CatalogError, ProductCatalog, ProductQuery, SortOrder, StaticCatalog};
pub use observer::SubscriptionId;
pub use session::Session;
pub use storage::{FileBackend, MemoryBackend, StorageBackend, StorageError, keys};
pub use wishlist::WishlistStore;
