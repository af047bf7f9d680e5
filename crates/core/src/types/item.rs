//! Products and cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A purchasable product as supplied by an add-to-cart affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// One product entry in the cart.
///
/// The serialized field names match the layout of the persisted cart:
/// `{"id", "name", "price", "image", "quantity"}`. The page script omits
/// `image` for products without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    pub quantity: Quantity,
}

impl LineItem {
    /// A line holding a single unit of `product`.
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: Quantity::ONE,
        }
    }

    /// `price * quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .amount()
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// Sum of [`LineItem::line_total`] over `items`, saturating at [`Decimal::MAX`].
#[must_use]
pub fn cart_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product::new(
            ProductId::parse("p1").unwrap(),
            "Shirt",
            Price::parse("19.99").unwrap(),
            "shirt.png",
        )
    }

    #[test]
    fn test_from_product_starts_at_one() {
        let item = LineItem::from_product(shirt());
        assert_eq!(item.quantity, Quantity::ONE);
        assert_eq!(item.line_total(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_line_total() {
        let mut item = LineItem::from_product(shirt());
        item.quantity = Quantity::new(3).unwrap();
        assert_eq!(item.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_reads_page_script_layout() {
        let json = r#"{"id":"p1","name":"Shirt","price":19.99,"image":"shirt.png","quantity":2}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "p1");
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.price, Price::parse("19.99").unwrap());
    }

    #[test]
    fn test_reads_line_without_image() {
        let json = r#"{"id":"p1","name":"Shirt","price":19.99,"quantity":2}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.image, "");
        assert_eq!(item.quantity.get(), 2);
    }

    #[test]
    fn test_totals_at_largest_price_and_quantity() {
        let mut item = LineItem::from_product(Product::new(
            ProductId::parse("p1").unwrap(),
            "Big",
            Price::new(Price::MAX).unwrap(),
            "",
        ));
        item.quantity = Quantity::new(u32::MAX).unwrap();

        let line = item.line_total();
        assert_eq!(line, Price::MAX * Decimal::from(u32::MAX));
        assert_eq!(cart_total(&[item.clone(), item]), line * Decimal::TWO);
    }

    #[test]
    fn test_cart_total() {
        let mut hat = LineItem::from_product(Product::new(
            ProductId::parse("p2").unwrap(),
            "Hat",
            Price::parse("10").unwrap(),
            "hat.png",
        ));
        hat.quantity = Quantity::new(3).unwrap();
        let shirt = LineItem::from_product(shirt());

        assert_eq!(cart_total(&[]), Decimal::ZERO);
        assert_eq!(cart_total(&[shirt, hat]), Decimal::new(4999, 2));
    }
}
