//! Trend Bazar Cart library.
//!
//! A shopping cart widget without a live document: the cart store and its
//! persistence slot, the askama-rendered view, the one-at-a-time notifier
//! and the page decorations, all driven by typed UI events.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the line items and notifies listeners after
//!   every mutation
//! - [`slot::PersistenceSlot`] is the listener that writes the cart to a
//!   [`storage::Storage`] key
//! - [`view::ViewBinding`] is the listener that re-renders into the
//!   [`page::Page`]
//! - [`widget::CartWidget`] registers event handlers that close over the
//!   shared store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod decorations;
pub mod error;
pub mod events;
pub mod notifier;
pub mod page;
pub mod slot;
pub mod storage;
pub mod store;
pub mod timers;
pub mod view;
pub mod widget;

pub use config::CartConfig;
pub use error::{CartError, ItemDataError, Result};
pub use events::{EventKind, EventRouter, ProductData, UiEvent};
pub use notifier::{Notification, Notifier, Phase};
pub use page::{Page, SharedPage};
pub use slot::{LoadError, PersistenceSlot};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{AddOutcome, CartListener, CartStore, ClearOutcome, QuantityOutcome, RemoveOutcome};
pub use widget::{CartWidget, Confirm, SharedStore};
