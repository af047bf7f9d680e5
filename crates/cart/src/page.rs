//! Model of the document the widget draws into.
//!
//! Handlers, the view listener and timer callbacks all write here instead
//! of touching a live DOM. A host copies the state into its real document;
//! tests simply inspect it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::decorations::ScrollRequest;
use crate::view::{Badge, RenderedCart};

/// Rendered state of the cart widget and its page decorations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Whether the cart modal is shown.
    pub modal_open: bool,
    /// Whether page scrolling is locked behind the modal.
    pub body_scroll_locked: bool,
    /// Inner HTML of the cart item list.
    pub cart_items_html: String,
    /// Cart count badge.
    pub badge: Badge,
    /// Markup of the cart count badge.
    pub badge_html: String,
    /// Formatted cart total.
    pub total_text: String,
    /// Markup of the notification on screen, if any.
    pub notification_html: Option<String>,
    /// Whether the cart button is playing its bounce animation.
    pub cart_button_bouncing: bool,
    /// Most recent smooth scroll requested by an anchor click.
    pub scroll_request: Option<ScrollRequest>,
    /// Classes added to images, keyed by image source.
    pub image_classes: BTreeMap<String, BTreeSet<&'static str>>,
    /// Inline transform per product card.
    pub card_transforms: BTreeMap<String, &'static str>,
}

impl Page {
    /// Whether the image at `src` carries `class`.
    #[must_use]
    pub fn image_has_class(&self, src: &str, class: &str) -> bool {
        self.image_classes
            .get(src)
            .is_some_and(|classes| classes.contains(class))
    }

    /// Replace the cart portion of the page with a fresh render.
    pub fn apply_cart(&mut self, rendered: RenderedCart) {
        self.cart_items_html = rendered.items_html;
        self.badge = rendered.badge;
        self.badge_html = rendered.badge_html;
        self.total_text = rendered.total;
    }
}

/// Page handle shared between handlers, listeners and timers.
#[derive(Debug, Clone, Default)]
pub struct SharedPage(Arc<Mutex<Page>>);

impl SharedPage {
    /// Lock the page for reading or writing.
    ///
    /// A poisoned lock still yields the page: every writer leaves it in a
    /// displayable state.
    pub fn lock(&self) -> MutexGuard<'_, Page> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current page.
    #[must_use]
    pub fn snapshot(&self) -> Page {
        self.lock().clone()
    }
}
