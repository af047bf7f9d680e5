//! Cart rendering.
//!
//! The view is a pure function of the cart: item list markup, the count
//! badge and the formatted total. [`ViewBinding`] subscribes that function
//! to the store so the page is redrawn after every mutation.

use askama::Template;
use trendbazar_core::{CurrencyCode, LineItem, NotificationKind, cart_total};

use crate::error::CartError;
use crate::page::SharedPage;
use crate::store::CartListener;

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Target quantity sent by the minus control.
    pub decrement_to: i64,
    /// Target quantity sent by the plus control.
    pub increment_to: i64,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the display data for `items`.
    #[must_use]
    pub fn new(items: &[LineItem], currency: CurrencyCode) -> Self {
        let total = cart_total(items);
        let item_count = items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum();

        Self {
            items: items
                .iter()
                .map(|line| CartItemView::new(line, currency))
                .collect(),
            total: currency.format(total),
            item_count,
        }
    }
}

impl CartItemView {
    fn new(line: &LineItem, currency: CurrencyCode) -> Self {
        let quantity = line.quantity.get();
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity,
            price: currency.format(line.price.amount()),
            line_price: currency.format(line.line_total()),
            decrement_to: i64::from(quantity) - 1,
            increment_to: i64::from(quantity) + 1,
        }
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Notification fragment template.
#[derive(Template)]
#[template(path = "partials/notification.html")]
pub struct NotificationTemplate<'a> {
    pub message: &'a str,
    pub kind: NotificationKind,
    pub showing: bool,
}

/// The cart count badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badge {
    pub count: u64,
    /// Hidden while the cart is empty.
    pub visible: bool,
}

impl Badge {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Everything the view draws for one cart state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCart {
    pub items_html: String,
    pub badge: Badge,
    pub badge_html: String,
    pub total: String,
}

/// Render the cart.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render_cart(items: &[LineItem], currency: CurrencyCode) -> Result<RenderedCart, CartError> {
    let cart = CartView::new(items, currency);
    let badge = Badge::new(cart.item_count);

    Ok(RenderedCart {
        items_html: CartItemsTemplate { cart: &cart }.render()?,
        badge_html: CartCountTemplate { count: badge.count }.render()?,
        badge,
        total: cart.total,
    })
}

/// Store listener that redraws the cart into the page.
#[derive(Debug, Clone)]
pub struct ViewBinding {
    page: SharedPage,
    currency: CurrencyCode,
}

impl ViewBinding {
    #[must_use]
    pub const fn new(page: SharedPage, currency: CurrencyCode) -> Self {
        Self { page, currency }
    }

    /// Render `items` and write the result into the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render; the page keeps its
    /// previous contents.
    pub fn render(&self, items: &[LineItem]) -> Result<(), CartError> {
        let rendered = render_cart(items, self.currency)?;
        self.page.lock().apply_cart(rendered);
        Ok(())
    }
}

impl CartListener for ViewBinding {
    fn on_change(&mut self, items: &[LineItem]) -> Result<(), CartError> {
        self.render(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use trendbazar_core::{Price, Product, ProductId, Quantity};

    use super::*;

    fn line(id: &str, name: &str, price: &str, quantity: u32) -> LineItem {
        let mut line = LineItem::from_product(Product::new(
            ProductId::parse(id).unwrap(),
            name,
            Price::parse(price).unwrap(),
            format!("{id}.png"),
        ));
        line.quantity = Quantity::new(quantity).unwrap();
        line
    }

    #[test]
    fn test_empty_cart_placeholder_and_hidden_badge() {
        let rendered = render_cart(&[], CurrencyCode::USD).unwrap();
        assert!(rendered.items_html.contains("Your cart is empty"));
        assert!(!rendered.items_html.contains("cart-item\""));
        assert_eq!(rendered.badge, Badge { count: 0, visible: false });
        assert!(rendered.badge_html.contains("display: none"));
        assert_eq!(rendered.total, "$0.00");
    }

    #[test]
    fn test_rows_and_totals() {
        let items = [line("p1", "Shirt", "19.99", 2), line("p2", "Mug", "10", 1)];
        let rendered = render_cart(&items, CurrencyCode::USD).unwrap();

        assert!(!rendered.items_html.contains("Your cart is empty"));
        assert!(rendered.items_html.contains("<h4>Shirt</h4>"));
        assert!(rendered.items_html.contains("$39.98"));
        assert!(rendered.items_html.contains("$10.00"));
        assert_eq!(rendered.items_html.matches("class=\"cart-item\"").count(), 2);
        assert_eq!(rendered.badge, Badge { count: 3, visible: true });
        assert!(rendered.badge_html.contains("display: flex"));
        assert!(rendered.badge_html.contains(">3<"));
        assert_eq!(rendered.total, "$49.98");
    }

    #[test]
    fn test_quantity_controls_carry_targets() {
        let view = CartView::new(&[line("p1", "Shirt", "1", 1)], CurrencyCode::USD);
        let row = view.items.first().unwrap();
        assert_eq!(row.decrement_to, 0);
        assert_eq!(row.increment_to, 2);

        let html = CartItemsTemplate { cart: &view }.render().unwrap();
        assert!(html.contains(r#"data-action="set-quantity" data-id="p1" data-quantity="0""#));
        assert!(html.contains(r#"data-action="set-quantity" data-id="p1" data-quantity="2""#));
        assert!(html.contains(r#"data-action="remove" data-id="p1""#));
    }

    #[test]
    fn test_names_are_escaped() {
        let items = [line("p1", "<script>alert(1)</script>", "1", 1)];
        let rendered = render_cart(&items, CurrencyCode::USD).unwrap();
        assert!(!rendered.items_html.contains("<script>"));
        assert!(rendered.items_html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_notification_template() {
        let html = NotificationTemplate {
            message: "Cart cleared!",
            kind: NotificationKind::Info,
            showing: true,
        }
        .render()
        .unwrap();
        assert!(html.contains("notification-info notification-show"));
        assert!(html.contains("fa-info-circle"));
        assert!(html.contains("<span>Cart cleared!</span>"));
    }

    #[test]
    fn test_binding_writes_page() {
        let page = SharedPage::default();
        let mut binding = ViewBinding::new(page.clone(), CurrencyCode::GBP);
        binding.on_change(&[line("p1", "Shirt", "2.5", 2)]).unwrap();

        let snapshot = page.snapshot();
        assert_eq!(snapshot.total_text, "£5.00");
        assert_eq!(snapshot.badge.count, 2);
        assert!(snapshot.cart_items_html.contains("Shirt"));
    }
}
