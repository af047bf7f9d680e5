//! Fire-and-forget delayed callbacks.

use std::time::Duration;

use tokio::runtime::Handle;

/// Run `callback` after `delay` on the ambient tokio runtime.
///
/// Returns `false` and drops the callback when no runtime is available, in
/// which case whatever state the callback would have changed stays as is.
pub fn schedule<F>(delay: Duration, callback: F) -> bool
where
    F: FnOnce() + Send + 'static,
{
    let Ok(handle) = Handle::try_current() else {
        tracing::warn!(?delay, "No async runtime, skipping scheduled callback");
        return false;
    };

    handle.spawn(async move {
        tokio::time::sleep(delay).await;
        callback();
    });
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn test_without_runtime() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        assert!(!schedule(Duration::ZERO, move || flag.store(true, Ordering::SeqCst)));
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        assert!(schedule(Duration::from_millis(600), move || {
            flag.store(true, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(599)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }
}
