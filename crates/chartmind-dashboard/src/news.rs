use std::sync::Arc;
use std::time::Duration;

use chartmind_client::{AnalysisBackend, ClientResult};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::toast::ToastBoard;
use crate::view::DashboardView;

/// Periodically refreshes the news panel and raises a toast for every
/// high-impact headline.
pub struct NewsPoller {
    backend: Arc<dyn AnalysisBackend>,
    view: Arc<dyn DashboardView>,
    toasts: ToastBoard,
    period: Duration,
    impact_threshold: f64,
}

impl NewsPoller {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        view: Arc<dyn DashboardView>,
        toasts: ToastBoard,
        period: Duration,
        impact_threshold: f64,
    ) -> Self {
        Self {
            backend,
            view,
            toasts,
            period,
            impact_threshold,
        }
    }

    /// Fetch once, rebuild the panel, and toast high-impact items.
    /// Returns the number of toasts raised. On error the panel is untouched.
    pub async fn poll_once(&self) -> ClientResult<usize> {
        let items = self.backend.fetch_news().await?;
        self.view.render_news(&items);

        let mut raised = 0;
        for item in items.iter().filter(|i| i.impact_score >= self.impact_threshold) {
            self.toasts
                .push(&format!("High Impact News: {}", item.headline_text()));
            raised += 1;
        }

        tracing::debug!("News refreshed: {} items, {} high impact", items.len(), raised);
        Ok(raised)
    }

    /// Run the poll loop on its own task. The first poll happens immediately.
    pub fn start(self) -> NewsPollerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!("News poller started (every {}s)", self.period.as_secs());

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        tokio::select! {
                            result = self.poll_once() => {
                                if let Err(e) = result {
                                    tracing::warn!("News poll failed: {}", e);
                                }
                            }
                            _ = shutdown_rx.changed() => {
                                tracing::debug!("Abandoning in-flight news poll");
                                break;
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            tracing::info!("News poller stopped");
        });

        NewsPollerHandle { shutdown_tx, task }
    }
}

/// Owner of a running [`NewsPoller`]. Dropping the handle without calling
/// [`stop`](Self::stop) also ends the loop at its next wake-up.
pub struct NewsPollerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl NewsPollerHandle {
    /// Cancel the poll loop and wait for it to finish. A fetch still in
    /// flight is dropped without rendering.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("News poller task ended abnormally: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
