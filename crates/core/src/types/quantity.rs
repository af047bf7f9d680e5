//! Line item quantity.

use core::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A positive item count.
///
/// A cart never stores a zero quantity: a target of zero or less means
/// "remove the item", which [`Quantity::from_target`] expresses as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Interpret a requested target quantity.
    ///
    /// Zero and negative targets yield `None`. Targets above `u32::MAX` are
    /// clamped.
    #[must_use]
    pub fn from_target(target: i64) -> Option<Self> {
        if target <= 0 {
            return None;
        }
        Self::new(u32::try_from(target).unwrap_or(u32::MAX))
    }

    /// Returns the count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
