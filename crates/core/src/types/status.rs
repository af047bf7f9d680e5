//! Status enums shown to the shopper.

use serde::{Deserialize, Serialize};

/// Kind of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Success,
    Info,
}

impl NotificationKind {
    /// Name used in CSS classes and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    /// Font Awesome icon name.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Info => "info-circle",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
