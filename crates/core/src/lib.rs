//! Versiq Core - Shared types library.
//!
//! This crate provides common types used across all Versiq components:
//! - `store` - Cart, wishlist, catalog, and session state layer
//! - `cli` - Command-line driver for the state layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! subscriptions. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, products, cart line items, and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
