//! Core types for Versiq.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod product;
pub mod user;

pub use cart::{CartLineItem, cart_item_id};
pub use email::{Email, EmailError};
pub use id::*;
pub use product::{Arrival, Product};
pub use user::{OAuthProvider, User, UserId};
