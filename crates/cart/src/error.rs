//! Unified error handling for the cart.
//!
//! Nothing in the cart is fatal. Callers either surface these errors as
//! informational notifications or log them and carry on with the in-memory
//! state.

use thiserror::Error;
use trendbazar_core::{PriceError, ProductIdError};

use crate::storage::StorageError;

/// The data attached to an add-to-cart affordance was unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemDataError {
    /// A required attribute was not supplied.
    #[error("missing product attribute: {0}")]
    MissingField(&'static str),

    /// The product id is not valid.
    #[error("invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),

    /// The price is not a non-negative number.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Application-level error type for the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Product data on an add request was rejected.
    #[error("Invalid item data: {0}")]
    InvalidItemData(#[from] ItemDataError),

    /// Reading or writing the persistence slot failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized for persistence.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
