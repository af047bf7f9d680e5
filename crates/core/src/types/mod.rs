//! Core types for Trend Bazar.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod item;
pub mod price;
pub mod quantity;
pub mod status;

pub use id::{ProductId, ProductIdError};
pub use item::{LineItem, Product, cart_total};
pub use price::{CurrencyCode, Price, PriceError};
pub use quantity::Quantity;
pub use status::NotificationKind;
