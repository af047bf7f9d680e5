//! UI events and handler registration.
//!
//! Affordances on the page report what happened as a [`UiEvent`]. Handlers
//! are registered per [`EventKind`] on an [`EventRouter`] and run in
//! registration order.

use std::collections::HashMap;

use trendbazar_core::{Price, Product, ProductId};

use crate::error::{CartError, ItemDataError};

/// Raw product attributes attached to an add-to-cart affordance.
///
/// Every attribute is optional because the markup may omit any of them;
/// [`ProductData::parse`] decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductData {
    /// Attributes with every field present.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            price: Some(price.into()),
            image: Some(image.into()),
        }
    }

    /// Validate the attributes into a [`Product`].
    ///
    /// # Errors
    ///
    /// Returns [`ItemDataError`] if an attribute is missing, the id is
    /// invalid or the price is not a non-negative number.
    pub fn parse(&self) -> Result<Product, ItemDataError> {
        let id = self.id.as_deref().ok_or(ItemDataError::MissingField("id"))?;
        let name = self.name.as_deref().ok_or(ItemDataError::MissingField("name"))?;
        let price = self
            .price
            .as_deref()
            .ok_or(ItemDataError::MissingField("price"))?;
        let image = self.image.as_deref().unwrap_or_default();

        Ok(Product::new(
            ProductId::parse(id)?,
            name,
            Price::parse(price)?,
            image,
        ))
    }
}

/// Something the shopper did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An add-to-cart button was clicked.
    AddToCart(ProductData),
    /// A quantity control asked for a new quantity.
    ChangeQuantity { id: String, quantity: i64 },
    /// A remove control was clicked.
    RemoveItem { id: String },
    /// The clear-cart button was clicked.
    ClearCart,
    /// The cart button was clicked.
    OpenCart,
    /// The modal close button was clicked.
    CloseCart,
    /// A click anywhere in the window.
    WindowClick { on_backdrop: bool },
    /// A key was pressed.
    KeyDown { key: String },
    /// A link was clicked.
    AnchorClick { href: String },
    /// An image finished loading.
    ImageLoaded { src: String },
    /// The pointer entered or left a product card.
    CardHover { card: String, entered: bool },
}

/// Discriminant of a [`UiEvent`], used as the registration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AddToCart,
    ChangeQuantity,
    RemoveItem,
    ClearCart,
    OpenCart,
    CloseCart,
    WindowClick,
    KeyDown,
    AnchorClick,
    ImageLoaded,
    CardHover,
}

impl UiEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::AddToCart(_) => EventKind::AddToCart,
            Self::ChangeQuantity { .. } => EventKind::ChangeQuantity,
            Self::RemoveItem { .. } => EventKind::RemoveItem,
            Self::ClearCart => EventKind::ClearCart,
            Self::OpenCart => EventKind::OpenCart,
            Self::CloseCart => EventKind::CloseCart,
            Self::WindowClick { .. } => EventKind::WindowClick,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::AnchorClick { .. } => EventKind::AnchorClick,
            Self::ImageLoaded { .. } => EventKind::ImageLoaded,
            Self::CardHover { .. } => EventKind::CardHover,
        }
    }

    /// Translate a click on a rendered cart row control.
    ///
    /// `action`, `id` and `quantity` are the `data-action`, `data-id` and
    /// `data-quantity` attributes of the clicked element. Unknown actions and
    /// malformed quantities yield `None`.
    #[must_use]
    pub fn from_control(action: &str, id: &str, quantity: Option<&str>) -> Option<Self> {
        match action {
            "set-quantity" => {
                let quantity = quantity?.trim().parse().ok()?;
                Some(Self::ChangeQuantity {
                    id: id.to_owned(),
                    quantity,
                })
            }
            "remove" => Some(Self::RemoveItem { id: id.to_owned() }),
            _ => None,
        }
    }
}

/// A registered event handler.
pub type Handler = Box<dyn FnMut(&UiEvent) -> Result<(), CartError>>;

/// Handlers keyed by the kind of event they listen for.
#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&EventKind, usize> =
            self.handlers.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("EventRouter").field("handlers", &counts).finish()
    }
}

impl EventRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&UiEvent) -> Result<(), CartError> + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Run every handler registered for the event's kind.
    ///
    /// Returns how many handlers ran.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first handler error.
    pub fn dispatch(&mut self, event: &UiEvent) -> Result<usize, CartError> {
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return Ok(0);
        };
        for handler in handlers.iter_mut() {
            handler(event)?;
        }
        Ok(handlers.len())
    }
}
