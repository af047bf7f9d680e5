//! The persistence slot: one storage key holding the whole cart.
//!
//! The slot is written wholesale after every cart mutation by subscribing it
//! to the [`CartStore`](crate::store::CartStore) as a listener. Reading is
//! fail-soft: anything that is not a well-formed cart comes back as an empty
//! one.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};
use trendbazar_core::LineItem;

use crate::error::CartError;
use crate::storage::{Storage, StorageError};
use crate::store::CartListener;

/// Why persisted cart contents could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The storage backend failed.
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),

    /// The stored text is not a cart (bad JSON, zero quantity, negative or
    /// `null` price, ...).
    #[error("corrupt persisted cart: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Two entries share an id.
    #[error("corrupt persisted cart: duplicate product id {0:?}")]
    DuplicateId(String),
}

/// A named key in a [`Storage`] backend holding the serialized cart.
#[derive(Debug, Clone)]
pub struct PersistenceSlot<S> {
    storage: S,
    key: String,
}

impl<S: Storage> PersistenceSlot<S> {
    /// Bind the slot to `key` in `storage`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the cart, treating absent or corrupt contents as empty.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        match self.try_load() {
            Ok(items) => items,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable persisted cart");
                Vec::new()
            }
        }
    }

    /// Read the cart, reporting why it could not be used.
    ///
    /// An absent key is an empty cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if storage fails or the contents are corrupt.
    pub fn try_load(&self) -> Result<Vec<LineItem>, LoadError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            debug!(key = %self.key, "No persisted cart");
            return Ok(Vec::new());
        };

        let items: Vec<LineItem> = serde_json::from_str(&raw)?;

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(LoadError::DuplicateId(item.id.to_string()));
            }
        }

        debug!(key = %self.key, items = items.len(), "Loaded persisted cart");
        Ok(items)
    }

    /// Overwrite the slot with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self, items: &[LineItem]) -> Result<(), CartError> {
        let json = serde_json::to_string(items)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Delete the slot entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn wipe(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}

impl<S: Storage> CartListener for PersistenceSlot<S> {
    fn on_change(&mut self, items: &[LineItem]) -> Result<(), CartError> {
        self.save(items)
    }
}
