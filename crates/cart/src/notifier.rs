//! Transient status messages.
//!
//! At most one notification is on screen. Showing a new one removes the
//! current one immediately; each notification then walks through its own
//! phases on timers:
//!
//! ```text
//! Entering --show_delay--> Visible --(dismiss_after)--> Leaving --fade_out--> removed
//! ```
//!
//! `dismiss_after` is measured from creation. Timers of a superseded
//! notification find a different id on screen and do nothing.
//!
//! A notifier attached to a [`SharedPage`] re-renders the notification
//! markup into it after every change.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use askama::Template;
use tracing::{debug, warn};
use trendbazar_core::NotificationKind;

use crate::config::NotifierTiming;
use crate::error::CartError;
use crate::page::SharedPage;
use crate::timers::schedule;
use crate::view::NotificationTemplate;

/// Where a notification is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inserted but not yet slid in.
    Entering,
    /// Fully shown.
    Visible,
    /// Transitioning out; removed after the fade-out delay.
    Leaving,
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub phase: Phase,
}

impl Notification {
    /// Render the notification markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self) -> Result<String, CartError> {
        let html = NotificationTemplate {
            message: &self.message,
            kind: self.kind,
            showing: self.phase == Phase::Visible,
        }
        .render()?;
        Ok(html)
    }
}

#[derive(Debug, Default)]
struct Inner {
    current: Mutex<Option<Notification>>,
    next_id: AtomicU64,
    page: OnceLock<SharedPage>,
}

/// Shows one notification at a time. Clones share the same screen slot.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
    timing: NotifierTiming,
}

impl Notifier {
    #[must_use]
    pub fn new(timing: NotifierTiming) -> Self {
        Self {
            inner: Arc::new(Inner::default()),
            timing,
        }
    }

    /// Mirror the notification markup into `page` from now on.
    ///
    /// Returns `false` if the notifier already draws into a page.
    pub fn attach(&self, page: SharedPage) -> bool {
        let attached = self.inner.page.set(page).is_ok();
        if attached {
            publish(&self.inner);
        }
        attached
    }

    /// Show `message`, replacing whatever is currently shown.
    ///
    /// Returns the id of the new notification.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            phase: Phase::Entering,
        };
        debug!(id, %kind, message = %notification.message, "Showing notification");

        if let Some(previous) = self.slot().replace(notification) {
            debug!(id = previous.id, "Superseded notification");
        }
        publish(&self.inner);

        let inner = Arc::clone(&self.inner);
        schedule(self.timing.show_delay, move || {
            advance(&inner, id, Phase::Entering, Phase::Visible);
        });

        let inner = Arc::clone(&self.inner);
        let fade_out = self.timing.fade_out;
        schedule(self.timing.dismiss_after, move || {
            if advance(&inner, id, Phase::Visible, Phase::Leaving)
                || advance(&inner, id, Phase::Entering, Phase::Leaving)
            {
                schedule(fade_out, move || remove_if_current(&inner, id));
            }
        });

        id
    }

    /// The notification on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.slot().clone()
    }

    /// Remove the current notification immediately.
    pub fn dismiss(&self) -> Option<Notification> {
        let dismissed = self.slot().take();
        publish(&self.inner);
        dismissed
    }

    fn slot(&self) -> MutexGuard<'_, Option<Notification>> {
        lock(&self.inner)
    }
}

fn lock(inner: &Inner) -> MutexGuard<'_, Option<Notification>> {
    inner.current.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Move notification `id` from `from` to `to` if it is still on screen.
fn advance(inner: &Inner, id: u64, from: Phase, to: Phase) -> bool {
    let moved = match lock(inner).as_mut() {
        Some(n) if n.id == id && n.phase == from => {
            n.phase = to;
            true
        }
        _ => false,
    };
    if moved {
        publish(inner);
    }
    moved
}

fn remove_if_current(inner: &Inner, id: u64) {
    {
        let mut current = lock(inner);
        if !current.as_ref().is_some_and(|n| n.id == id) {
            return;
        }
        *current = None;
    }
    debug!(id, "Removed notification");
    publish(inner);
}

/// Render the current notification into the attached page, if any.
fn publish(inner: &Inner) {
    let Some(page) = inner.page.get() else {
        return;
    };
    let current = lock(inner).clone();
    let html = match current.as_ref().map(Notification::render).transpose() {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Failed to render notification");
            None
        }
    };
    page.lock().notification_html = html;
}
