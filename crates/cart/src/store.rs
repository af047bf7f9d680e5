//! The cart store: sole owner of the cart contents.
//!
//! Every mutation that changes the cart is followed by a synchronous call to
//! each subscribed [`CartListener`], in subscription order. Persistence and
//! rendering both hang off this hook, so the mutation methods themselves
//! know nothing about storage or markup.

use rust_decimal::Decimal;
use tracing::{debug, error};
use trendbazar_core::{LineItem, Product, ProductId, Quantity, cart_total};

use crate::error::CartError;
use crate::slot::PersistenceSlot;
use crate::storage::Storage;

/// Observer invoked after each cart mutation.
pub trait CartListener {
    /// Called with the cart contents after they changed.
    ///
    /// # Errors
    ///
    /// Errors are logged by the store; they do not undo the mutation.
    fn on_change(&mut self, items: &[LineItem]) -> Result<(), CartError>;
}

/// Result of [`CartStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was appended with quantity 1.
    Added,
    /// The product was already present; its quantity is now `quantity`.
    Updated { quantity: Quantity },
}

/// Result of [`CartStore::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line was removed.
    Removed(LineItem),
    /// No line had that id; nothing changed.
    NotFound,
}

/// Result of [`CartStore::set_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The quantity was overwritten.
    Updated { quantity: Quantity },
    /// The target was zero or negative and the line was removed.
    Removed(LineItem),
    /// No line had that id; nothing changed.
    NotFound,
}

/// Result of [`CartStore::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// `removed` lines were dropped.
    Cleared { removed: usize },
    /// The cart held nothing.
    AlreadyEmpty,
}

/// Ordered list of line items plus the listeners that observe it.
#[derive(Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    listeners: Vec<Box<dyn CartListener>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    /// Create an empty store with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `items`.
    ///
    /// The caller is responsible for the one-line-per-id invariant; carts
    /// read through [`PersistenceSlot::load`] already satisfy it.
    #[must_use]
    pub fn with_items(items: Vec<LineItem>) -> Self {
        Self {
            items,
            listeners: Vec::new(),
        }
    }

    /// Restore the cart from `slot` and persist every later mutation to it.
    pub fn restore<S: Storage + 'static>(slot: PersistenceSlot<S>) -> Self {
        let mut store = Self::with_items(slot.load());
        store.subscribe(slot);
        store
    }

    /// Register a listener for subsequent mutations.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add one unit of `product`.
    ///
    /// An existing line with the same id gets its quantity incremented; its
    /// stored name, price and image are left as they were.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        let outcome = if let Some(line) = self.find_mut(&product.id) {
            line.quantity = line.quantity.incremented();
            debug!(id = %product.id, quantity = %line.quantity, "Incremented cart line");
            AddOutcome::Updated {
                quantity: line.quantity,
            }
        } else {
            debug!(id = %product.id, "Appended cart line");
            self.items.push(LineItem::from_product(product));
            AddOutcome::Added
        };
        self.changed();
        outcome
    }

    /// Remove the line for `id`, if present.
    pub fn remove(&mut self, id: &ProductId) -> RemoveOutcome {
        let Some(index) = self.position(id) else {
            debug!(%id, "Remove ignored, not in cart");
            return RemoveOutcome::NotFound;
        };
        let line = self.items.remove(index);
        debug!(%id, "Removed cart line");
        self.changed();
        RemoveOutcome::Removed(line)
    }

    /// Set the quantity for `id`. A target of zero or less removes the line.
    pub fn set_quantity(&mut self, id: &ProductId, target: i64) -> QuantityOutcome {
        let Some(quantity) = Quantity::from_target(target) else {
            return match self.remove(id) {
                RemoveOutcome::Removed(line) => QuantityOutcome::Removed(line),
                RemoveOutcome::NotFound => QuantityOutcome::NotFound,
            };
        };

        let Some(line) = self.find_mut(id) else {
            debug!(%id, "Quantity change ignored, not in cart");
            return QuantityOutcome::NotFound;
        };
        line.quantity = quantity;
        debug!(%id, %quantity, "Set cart line quantity");
        self.changed();
        QuantityOutcome::Updated { quantity }
    }

    /// Empty the cart.
    ///
    /// Confirmation is the caller's job; an empty cart reports
    /// [`ClearOutcome::AlreadyEmpty`] and notifies no listener.
    pub fn clear(&mut self) -> ClearOutcome {
        if self.items.is_empty() {
            return ClearOutcome::AlreadyEmpty;
        }
        let removed = self.items.len();
        self.items.clear();
        debug!(removed, "Cleared cart");
        self.changed();
        ClearOutcome::Cleared { removed }
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.items)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|line| &line.id == id)
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| &line.id == id)
    }

    fn changed(&mut self) {
        for listener in &mut self.listeners {
            if let Err(e) = listener.on_change(&self.items) {
                error!(error = %e, "Cart listener failed");
            }
        }
    }
}
