//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory backing the file storage (default: .trendbazar)
//! - `CART_STORAGE_KEY` - Persistence slot key (default: trendBazarCart)
//! - `CART_CURRENCY` - Display currency: USD, EUR, GBP, CAD or AUD (default: USD)
//! - `CART_NOTIFY_SHOW_DELAY_MS` - Delay before a notification slides in (default: 100)
//! - `CART_NOTIFY_DISMISS_MS` - Time until a notification starts leaving (default: 3000)
//! - `CART_NOTIFY_FADE_MS` - Fade-out time before removal (default: 300)
//! - `CART_BOUNCE_MS` - Cart button bounce duration (default: 600)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use trendbazar_core::CurrencyCode;

/// Default persistence slot key, shared with the page script.
pub const DEFAULT_STORAGE_KEY: &str = "trendBazarCart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding one JSON file per storage key
    pub storage_dir: PathBuf,
    /// Key of the persistence slot
    pub storage_key: String,
    /// Currency used to format prices
    pub currency: CurrencyCode,
    /// Notification timings
    pub notifier: NotifierTiming,
    /// How long the cart button bounces after an add
    pub bounce: Duration,
}

/// Notification phase timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierTiming {
    /// Delay before the entering notification becomes visible
    pub show_delay: Duration,
    /// Time from creation until the notification starts leaving
    pub dismiss_after: Duration,
    /// Time between leaving and removal
    pub fade_out: Duration,
}

impl Default for NotifierTiming {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(100),
            dismiss_after: Duration::from_millis(3000),
            fade_out: Duration::from_millis(300),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".trendbazar"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            notifier: NotifierTiming::default(),
            bounce: Duration::from_millis(600),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_dir = lookup("CART_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let currency = match lookup("CART_CURRENCY") {
            Some(value) => value
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };

        let timing = defaults.notifier;
        let notifier = NotifierTiming {
            show_delay: get_millis(&lookup, "CART_NOTIFY_SHOW_DELAY_MS", timing.show_delay)?,
            dismiss_after: get_millis(&lookup, "CART_NOTIFY_DISMISS_MS", timing.dismiss_after)?,
            fade_out: get_millis(&lookup, "CART_NOTIFY_FADE_MS", timing.fade_out)?,
        };
        let bounce = get_millis(&lookup, "CART_BOUNCE_MS", defaults.bounce)?;

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
            notifier,
            bounce,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a millisecond duration, falling back to `default` when unset.
fn get_millis<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "trendBazarCart");
        assert_eq!(config.notifier.dismiss_after, Duration::from_secs(3));
        assert_eq!(config.notifier.fade_out, Duration::from_millis(300));
        assert_eq!(config.bounce, Duration::from_millis(600));
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("CART_STORAGE_DIR", "/tmp/carts"),
            ("CART_STORAGE_KEY", "otherCart"),
            ("CART_CURRENCY", "eur"),
            ("CART_NOTIFY_DISMISS_MS", "5000"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.storage_key, "otherCart");
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.notifier.dismiss_after, Duration::from_secs(5));
        assert_eq!(config.notifier.show_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_millis() {
        let result = CartConfig::from_lookup(lookup_from(&[("CART_BOUNCE_MS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "CART_BOUNCE_MS"));
    }

    #[test]
    fn test_invalid_currency() {
        let result = CartConfig::from_lookup(lookup_from(&[("CART_CURRENCY", "BTC")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_storage_key() {
        let result = CartConfig::from_lookup(lookup_from(&[("CART_STORAGE_KEY", "")]));
        assert!(result.is_err());
    }
}
