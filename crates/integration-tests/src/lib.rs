//! Integration tests for Trend Bazar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trendbazar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Store, slot and storage backends together
//! - `cart_widget` - Full shopper flows through the mounted widget

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use trendbazar_cart::decorations::SmoothScroll;
use trendbazar_cart::{
    CartConfig, CartStore, CartWidget, Confirm, Notifier, PersistenceSlot, Storage,
};

/// A storage directory under the system temp dir, removed on drop.
pub struct TempDir(PathBuf);

impl TempDir {
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("trendbazar-it-{}", uuid::Uuid::new_v4()));
        Self(path)
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.0
    }
}

impl Default for TempDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Mount a widget over a store restored from `storage`.
///
/// # Panics
///
/// Panics if the initial render fails.
pub fn mount<S>(storage: S, confirm: impl Confirm + 'static) -> CartWidget
where
    S: Storage + 'static,
{
    let config = CartConfig::default();
    let slot = PersistenceSlot::new(storage, config.storage_key.clone());
    let store = Rc::new(RefCell::new(CartStore::restore(slot)));
    CartWidget::mount(
        &config,
        store,
        Notifier::new(config.notifier),
        confirm,
        SmoothScroll::new(["products", "about", "contact"]),
    )
    .expect("initial render")
}
