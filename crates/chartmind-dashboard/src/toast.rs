use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::view::{DashboardView, ToastId};

/// Transient notifications that remove themselves after `ttl`.
///
/// Toasts are independent: pushing several at once shows all of them, each
/// with its own dismissal timer.
#[derive(Clone)]
pub struct ToastBoard {
    view: Arc<dyn DashboardView>,
    ttl: Duration,
    next_id: Arc<AtomicU64>,
}

impl ToastBoard {
    pub fn new(view: Arc<dyn DashboardView>, ttl: Duration) -> Self {
        Self {
            view,
            ttl,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Show `message` and schedule its removal. Must be called from within a
    /// Tokio runtime.
    pub fn push(&self, message: &str) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.view.show_toast(id, message);

        let view = Arc::clone(&self.view);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            view.dismiss_toast(id);
        });

        id
    }
}
