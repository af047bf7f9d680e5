//! The cart widget: store, view, notifier and page decorations wired to
//! UI events.
//!
//! [`CartWidget::mount`] takes the one store the application built at
//! start-up, subscribes the view to it, and registers a handler per event
//! kind. Each handler closes over the pieces it needs; there is no global
//! cart.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, instrument, warn};
use trendbazar_core::{NotificationKind, ProductId};

use crate::config::CartConfig;
use crate::decorations::{IMAGE_LOADED_CLASS, SmoothScroll, card_transform};
use crate::error::CartError;
use crate::events::{EventKind, EventRouter, UiEvent};
use crate::notifier::Notifier;
use crate::page::{Page, SharedPage};
use crate::store::{AddOutcome, CartStore, ClearOutcome, QuantityOutcome, RemoveOutcome};
use crate::timers::schedule;
use crate::view::ViewBinding;

/// Question asked before emptying a non-empty cart.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear your cart?";
/// Shown when clearing a cart that holds nothing.
pub const ALREADY_EMPTY_MESSAGE: &str = "Cart is already empty!";
/// Shown after the cart was emptied.
pub const CLEARED_MESSAGE: &str = "Cart cleared!";
/// Shown after a line was removed.
pub const REMOVED_MESSAGE: &str = "Item removed from cart!";

/// A yes/no gate in front of destructive actions.
pub trait Confirm {
    /// Ask `prompt`; `true` means proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Store shared by the widget's handlers.
pub type SharedStore = Rc<RefCell<CartStore>>;

/// A mounted cart widget.
#[derive(Debug)]
pub struct CartWidget {
    store: SharedStore,
    page: SharedPage,
    notifier: Notifier,
    router: EventRouter,
}

impl CartWidget {
    /// Attach the widget to `store`.
    ///
    /// Renders the current cart into a fresh page, subscribes the view so
    /// every later mutation re-renders, points the notifier at the page and
    /// registers all event handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial render fails.
    pub fn mount(
        config: &CartConfig,
        store: SharedStore,
        notifier: Notifier,
        confirm: impl Confirm + 'static,
        scroll: SmoothScroll,
    ) -> Result<Self, CartError> {
        let page = SharedPage::default();

        let binding = ViewBinding::new(page.clone(), config.currency);
        binding.render(store.borrow().items())?;
        store.borrow_mut().subscribe(binding);
        if !notifier.attach(page.clone()) {
            warn!("Notifier already draws into another page");
        }

        let mut router = EventRouter::new();
        register_cart_handlers(&mut router, &store, &notifier, &page, config.bounce);
        register_clear_handler(&mut router, &store, &notifier, confirm);
        register_modal_handlers(&mut router, &page);
        register_decoration_handlers(&mut router, &page, scroll);

        debug!(items = store.borrow().len(), "Mounted cart widget");
        Ok(Self {
            store,
            page,
            notifier,
            router,
        })
    }

    /// Handle one UI event.
    ///
    /// Returns how many handlers ran.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItemData`] when an add carries unusable
    /// product data; the cart is left untouched.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: &UiEvent) -> Result<usize, CartError> {
        self.router.dispatch(event)
    }

    /// Copy of the current page state.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page.snapshot()
    }

    /// The store the widget drives.
    #[must_use]
    pub const fn store(&self) -> &SharedStore {
        &self.store
    }

    /// The widget's notifier.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn register_cart_handlers(
    router: &mut EventRouter,
    store: &SharedStore,
    notifier: &Notifier,
    page: &SharedPage,
    bounce: Duration,
) {
    let (add_store, add_notifier, add_page) = (Rc::clone(store), notifier.clone(), page.clone());
    router.on(EventKind::AddToCart, move |event| {
        let UiEvent::AddToCart(data) = event else {
            return Ok(());
        };
        let product = data.parse().inspect_err(|e| {
            warn!(error = %e, ?data, "Rejected add to cart");
        })?;

        let name = product.name.clone();
        let outcome = add_store.borrow_mut().add(product);
        let message = match outcome {
            AddOutcome::Added => format!("{name} added to cart!"),
            AddOutcome::Updated { .. } => format!("{name} quantity updated!"),
        };
        add_notifier.notify(message, NotificationKind::Success);
        bounce_cart_button(&add_page, bounce);
        Ok(())
    });

    let (remove_store, remove_notifier) = (Rc::clone(store), notifier.clone());
    router.on(EventKind::RemoveItem, move |event| {
        let UiEvent::RemoveItem { id } = event else {
            return Ok(());
        };
        let Ok(id) = ProductId::parse(id) else {
            return Ok(());
        };
        let outcome = remove_store.borrow_mut().remove(&id);
        if let RemoveOutcome::Removed(_) = outcome {
            remove_notifier.notify(REMOVED_MESSAGE, NotificationKind::Info);
        }
        Ok(())
    });

    let (quantity_store, quantity_notifier) = (Rc::clone(store), notifier.clone());
    router.on(EventKind::ChangeQuantity, move |event| {
        let UiEvent::ChangeQuantity { id, quantity } = event else {
            return Ok(());
        };
        let Ok(id) = ProductId::parse(id) else {
            return Ok(());
        };
        let outcome = quantity_store.borrow_mut().set_quantity(&id, *quantity);
        if let QuantityOutcome::Removed(_) = outcome {
            quantity_notifier.notify(REMOVED_MESSAGE, NotificationKind::Info);
        }
        Ok(())
    });
}

fn register_clear_handler(
    router: &mut EventRouter,
    store: &SharedStore,
    notifier: &Notifier,
    confirm: impl Confirm + 'static,
) {
    let (store, notifier) = (Rc::clone(store), notifier.clone());
    router.on(EventKind::ClearCart, move |_| {
        if store.borrow().is_empty() {
            notifier.notify(ALREADY_EMPTY_MESSAGE, NotificationKind::Info);
            return Ok(());
        }
        if !confirm.confirm(CLEAR_PROMPT) {
            debug!("Clear cart declined");
            return Ok(());
        }
        let outcome = store.borrow_mut().clear();
        if let ClearOutcome::Cleared { .. } = outcome {
            notifier.notify(CLEARED_MESSAGE, NotificationKind::Info);
        }
        Ok(())
    });
}

fn register_modal_handlers(router: &mut EventRouter, page: &SharedPage) {
    let open_page = page.clone();
    router.on(EventKind::OpenCart, move |_| {
        set_modal(&open_page, true);
        Ok(())
    });

    let close_page = page.clone();
    router.on(EventKind::CloseCart, move |_| {
        set_modal(&close_page, false);
        Ok(())
    });

    let backdrop_page = page.clone();
    router.on(EventKind::WindowClick, move |event| {
        if matches!(event, UiEvent::WindowClick { on_backdrop: true }) {
            set_modal(&backdrop_page, false);
        }
        Ok(())
    });

    let key_page = page.clone();
    router.on(EventKind::KeyDown, move |event| {
        let is_escape = matches!(event, UiEvent::KeyDown { key } if key == "Escape");
        if is_escape && key_page.lock().modal_open {
            set_modal(&key_page, false);
        }
        Ok(())
    });
}

fn register_decoration_handlers(router: &mut EventRouter, page: &SharedPage, scroll: SmoothScroll) {
    let scroll_page = page.clone();
    router.on(EventKind::AnchorClick, move |event| {
        let UiEvent::AnchorClick { href } = event else {
            return Ok(());
        };
        if let Some(request) = scroll.resolve(href) {
            scroll_page.lock().scroll_request = Some(request);
        }
        Ok(())
    });

    let image_page = page.clone();
    router.on(EventKind::ImageLoaded, move |event| {
        if let UiEvent::ImageLoaded { src } = event {
            image_page
                .lock()
                .image_classes
                .entry(src.clone())
                .or_default()
                .insert(IMAGE_LOADED_CLASS);
        }
        Ok(())
    });

    let card_page = page.clone();
    router.on(EventKind::CardHover, move |event| {
        if let UiEvent::CardHover { card, entered } = event {
            card_page
                .lock()
                .card_transforms
                .insert(card.clone(), card_transform(*entered));
        }
        Ok(())
    });
}

fn set_modal(page: &SharedPage, open: bool) {
    let mut page = page.lock();
    page.modal_open = open;
    page.body_scroll_locked = open;
}

fn bounce_cart_button(page: &SharedPage, duration: Duration) {
    page.lock().cart_button_bouncing = true;
    let page = page.clone();
    schedule(duration, move || {
        page.lock().cart_button_bouncing = false;
    });
}
