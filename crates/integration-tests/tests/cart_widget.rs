//! Shopper flows through a mounted cart widget.

#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use trendbazar_cart::decorations::IMAGE_LOADED_CLASS;
use trendbazar_cart::widget::{ALREADY_EMPTY_MESSAGE, CLEARED_MESSAGE, REMOVED_MESSAGE};
use trendbazar_cart::{
    CartError, CartWidget, FileStorage, MemoryStorage, Phase, ProductData, UiEvent,
};
use trendbazar_core::NotificationKind;
use trendbazar_integration_tests::{TempDir, mount};

fn add(id: &str, name: &str, price: &str) -> UiEvent {
    UiEvent::AddToCart(ProductData::new(id, name, price, format!("{id}.png")))
}

fn message(widget: &CartWidget) -> Option<String> {
    widget.notifier().current().map(|n| n.message)
}

// =============================================================================
// Cart Flow Tests
// =============================================================================

#[test]
fn test_add_same_product_twice() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);
    widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();
    widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();

    let page = widget.page();
    assert_eq!(page.total_text, "$39.98");
    assert_eq!(page.badge.count, 2);
    assert!(page.badge.visible);
    assert_eq!(message(&widget).as_deref(), Some("Shirt quantity updated!"));
}

#[test]
fn test_quantity_zero_from_rendered_control_removes_line() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);
    widget.dispatch(&add("p2", "Hat", "10")).unwrap();
    widget
        .dispatch(&UiEvent::ChangeQuantity {
            id: "p2".to_string(),
            quantity: 3,
        })
        .unwrap();
    assert_eq!(widget.page().total_text, "$30.00");

    let event = UiEvent::from_control("set-quantity", "p2", Some("0")).unwrap();
    widget.dispatch(&event).unwrap();

    let page = widget.page();
    assert!(widget.store().borrow().is_empty());
    assert!(page.cart_items_html.contains("Your cart is empty"));
    assert!(!page.badge.visible);
    let current = widget.notifier().current().unwrap();
    assert_eq!(current.message, REMOVED_MESSAGE);
    assert_eq!(current.kind, NotificationKind::Info);
}

#[test]
fn test_rendered_rows_follow_store_order() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);
    widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();
    widget.dispatch(&add("p2", "Hat", "10")).unwrap();

    let html = widget.page().cart_items_html;
    let shirt = html.find("data-id=\"p1\"").unwrap();
    let hat = html.find("data-id=\"p2\"").unwrap();
    assert!(shirt < hat);
}

#[test]
fn test_invalid_product_leaves_cart_untouched() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);
    let err = widget.dispatch(&add("p1", "Shirt", "abc")).unwrap_err();

    assert!(matches!(err, CartError::InvalidItemData(_)));
    assert!(widget.store().borrow().is_empty());
    assert!(message(&widget).is_none());
}

// =============================================================================
// Clear Tests
// =============================================================================

#[test]
fn test_clear_empty_cart_skips_prompt() {
    let prompted = Rc::new(Cell::new(false));
    let flag = Rc::clone(&prompted);
    let mut widget = mount(MemoryStorage::new(), move |_: &str| {
        flag.set(true);
        true
    });

    widget.dispatch(&UiEvent::ClearCart).unwrap();
    assert!(!prompted.get());
    assert_eq!(message(&widget).as_deref(), Some(ALREADY_EMPTY_MESSAGE));
}

#[test]
fn test_clear_declined_keeps_items() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| false);
    widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();
    widget.dispatch(&UiEvent::ClearCart).unwrap();

    assert_eq!(widget.store().borrow().len(), 1);
    assert_ne!(message(&widget).as_deref(), Some(CLEARED_MESSAGE));
}

#[test]
fn test_clear_confirmed_empties_cart() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);
    widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();
    widget.dispatch(&UiEvent::ClearCart).unwrap();

    assert!(widget.store().borrow().is_empty());
    assert_eq!(widget.page().total_text, "$0.00");
    assert_eq!(message(&widget).as_deref(), Some(CLEARED_MESSAGE));
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_second_session_renders_persisted_cart() {
    let tmp = TempDir::new();
    {
        let mut widget = mount(FileStorage::new(tmp.path()), |_: &str| true);
        widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();
        widget.dispatch(&add("p2", "Hat", "10")).unwrap();
    }

    let widget = mount(FileStorage::new(tmp.path()), |_: &str| true);
    let page = widget.page();
    assert_eq!(page.total_text, "$29.99");
    assert_eq!(page.badge.count, 2);
    assert!(page.cart_items_html.contains("Shirt"));
    assert!(message(&widget).is_none());
}

// =============================================================================
// Page Tests
// =============================================================================

#[test]
fn test_modal_and_decorations() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);

    widget.dispatch(&UiEvent::OpenCart).unwrap();
    assert!(widget.page().modal_open);
    widget
        .dispatch(&UiEvent::KeyDown {
            key: "Escape".to_string(),
        })
        .unwrap();
    assert!(!widget.page().modal_open);

    widget
        .dispatch(&UiEvent::AnchorClick {
            href: "#products".to_string(),
        })
        .unwrap();
    widget
        .dispatch(&UiEvent::ImageLoaded {
            src: "p1.png".to_string(),
        })
        .unwrap();

    let page = widget.page();
    assert_eq!(page.scroll_request.as_ref().unwrap().target, "products");
    assert!(page.image_has_class("p1.png", IMAGE_LOADED_CLASS));
}

// =============================================================================
// Timed Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_notification_lifecycle_and_supersession() {
    let mut widget = mount(MemoryStorage::new(), |_: &str| true);
    widget.dispatch(&add("p1", "Shirt", "19.99")).unwrap();
    assert_eq!(widget.notifier().current().unwrap().phase, Phase::Entering);
    assert!(widget.page().cart_button_bouncing);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(widget.notifier().current().unwrap().phase, Phase::Visible);

    // A second add replaces the first notification and restarts its timers.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    widget.dispatch(&add("p2", "Hat", "10")).unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    let current = widget.notifier().current().unwrap();
    assert_eq!(current.message, "Hat added to cart!");
    assert_eq!(current.phase, Phase::Visible);
    assert!(!widget.page().cart_button_bouncing);

    tokio::time::sleep(Duration::from_millis(2200)).await;
    assert!(widget.notifier().current().is_none());
}
