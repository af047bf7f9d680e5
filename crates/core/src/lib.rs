//! Trend Bazar Core - Shared cart domain types.
//!
//! This crate provides the types shared by every Trend Bazar component:
//! - `cart` - Cart store, persistence, rendering and the page widget
//! - `cli` - Command-line front end over a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no storage access,
//! no rendering, no timers. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, quantities, line
//!   items and notification kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
