//! Cart commands.
//!
//! Every command opens the file-backed cart, mounts the same widget the
//! storefront page uses, and feeds it the event a shopper's click would
//! produce. Whatever the widget would have shown as a notification is
//! printed.
//!
//! # Environment Variables
//!
//! See [`trendbazar_cart::config`] for `CART_STORAGE_DIR`,
//! `CART_STORAGE_KEY` and `CART_CURRENCY`.

use std::cell::{Cell, RefCell};
use std::io::{BufRead, Write};
use std::rc::Rc;

use thiserror::Error;
use tracing::info;
use trendbazar_cart::config::ConfigError;
use trendbazar_cart::decorations::SmoothScroll;
use trendbazar_cart::{
    CartConfig, CartError, CartStore, CartWidget, FileStorage, Notifier, PersistenceSlot,
    ProductData, UiEvent,
};

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The cart rejected the request.
    #[error("{0}")]
    Cart(#[from] CartError),
}

/// An open cart plus the widget driving it.
pub struct Session {
    config: CartConfig,
    widget: CartWidget,
    assume_yes: Rc<Cell<bool>>,
}

impl Session {
    /// Open the cart configured by the environment.
    pub fn open() -> Result<Self, CommandError> {
        Self::with_config(CartConfig::from_env()?)
    }

    /// Open the cart described by `config`.
    pub fn with_config(config: CartConfig) -> Result<Self, CommandError> {
        let slot = PersistenceSlot::new(
            FileStorage::new(&config.storage_dir),
            config.storage_key.clone(),
        );
        let store = Rc::new(RefCell::new(CartStore::restore(slot)));

        let assume_yes = Rc::new(Cell::new(false));
        let flag = Rc::clone(&assume_yes);
        let widget = CartWidget::mount(
            &config,
            store,
            Notifier::new(config.notifier),
            move |prompt: &str| flag.get() || ask(prompt),
            SmoothScroll::default(),
        )?;

        info!(
            dir = %config.storage_dir.display(),
            key = %config.storage_key,
            currency = config.currency.code(),
            items = widget.store().borrow().len(),
            "Opened cart"
        );
        Ok(Self {
            config,
            widget,
            assume_yes,
        })
    }

    pub fn add(
        &mut self,
        id: String,
        name: String,
        price: String,
        image: String,
    ) -> Result<(), CommandError> {
        self.dispatch(&UiEvent::AddToCart(ProductData::new(id, name, price, image)))
    }

    pub fn set_quantity(&mut self, id: String, quantity: i64) -> Result<(), CommandError> {
        self.dispatch(&UiEvent::ChangeQuantity { id, quantity })
    }

    pub fn remove(&mut self, id: String) -> Result<(), CommandError> {
        self.dispatch(&UiEvent::RemoveItem { id })
    }

    pub fn clear(&mut self, assume_yes: bool) -> Result<(), CommandError> {
        self.assume_yes.set(assume_yes);
        self.dispatch(&UiEvent::ClearCart)
    }

    /// Print the cart as a summary, or as the rendered item list.
    #[allow(clippy::print_stdout)]
    pub fn show(&self, html: bool) {
        if html {
            println!("{}", self.widget.page().cart_items_html.trim());
            return;
        }

        let store = self.widget.store().borrow();
        if store.is_empty() {
            println!("Your cart is empty");
            return;
        }
        let currency = self.config.currency;
        for line in store.items() {
            println!(
                "{} x {} ({}) @ {} = {}",
                line.quantity,
                line.name,
                line.id,
                currency.format(line.price.amount()),
                currency.format(line.line_total()),
            );
        }
        drop(store);
        self.total();
    }

    /// Print the total and item count.
    #[allow(clippy::print_stdout)]
    pub fn total(&self) {
        println!("{}", self.summary());
    }

    fn summary(&self) -> String {
        let page = self.widget.page();
        format!(
            "Total: {} {} ({} items)",
            page.total_text,
            self.config.currency.code(),
            page.badge.count
        )
    }

    #[allow(clippy::print_stdout)]
    fn dispatch(&mut self, event: &UiEvent) -> Result<(), CommandError> {
        self.widget.dispatch(event)?;
        if let Some(notification) = self.widget.notifier().current() {
            println!("{}", notification.message);
        }
        Ok(())
    }
}

/// Ask a yes/no question on the terminal.
#[allow(clippy::print_stdout)]
fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

/// Anything but "y"/"yes" (any case, surrounding whitespace ignored) is no.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            Self(std::env::temp_dir().join(format!("bazar-cart-{}", uuid::Uuid::new_v4())))
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn session(dir: &TempDir) -> Session {
        let config = CartConfig {
            storage_dir: dir.0.clone(),
            ..CartConfig::default()
        };
        Session::with_config(config).unwrap()
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES  "));
        assert!(is_yes("Yes\r\n"));
        assert!(!is_yes(""));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_commands_persist_between_sessions() {
        let dir = TempDir::new();
        {
            let mut session = session(&dir);
            session
                .add("p1".into(), "Shirt".into(), "19.99".into(), String::new())
                .unwrap();
            session
                .add("p1".into(), "Shirt".into(), "19.99".into(), String::new())
                .unwrap();
            session
                .add("p2".into(), "Hat".into(), "10".into(), "hat.png".into())
                .unwrap();
            session.set_quantity("p2".into(), 3).unwrap();
        }

        let mut session = session(&dir);
        assert_eq!(session.summary(), "Total: $69.98 USD (5 items)");

        session.set_quantity("p2".into(), -1).unwrap();
        session.remove("ghost".into()).unwrap();
        assert_eq!(session.summary(), "Total: $39.98 USD (2 items)");
    }

    #[test]
    fn test_add_rejects_bad_price() {
        let dir = TempDir::new();
        let mut session = session(&dir);
        let err = session
            .add("p1".into(), "Shirt".into(), "abc".into(), String::new())
            .unwrap_err();
        assert!(matches!(err, CommandError::Cart(CartError::InvalidItemData(_))));
        assert_eq!(session.summary(), "Total: $0.00 USD (0 items)");
    }

    #[test]
    fn test_clear_with_yes_skips_prompt() {
        let dir = TempDir::new();
        let mut session = session(&dir);
        session
            .add("p1".into(), "Shirt".into(), "19.99".into(), String::new())
            .unwrap();
        session.clear(true).unwrap();
        assert!(session.widget.store().borrow().is_empty());

        let session = self::session(&dir);
        assert_eq!(session.summary(), "Total: $0.00 USD (0 items)");
    }
}
