use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chartmind_client::{
    load_charts, AnalysisBackend, AnalysisReply, ClientError, FeedbackReport, FieldValue,
    Outcome,
};

use crate::session::{CurrentSignal, RequestToken, Session};
use crate::view::{DashboardView, DisplayFields};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("No signal to feedback")]
    NoSignal,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// What became of an analyze request that reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// The response was rendered.
    Applied,
    /// A newer request was issued before this one answered; the response was
    /// dropped.
    Superseded,
}

/// The dashboard's user actions: upload & analyze, and win/loss feedback.
///
/// Every failed action produces exactly one alert on the view and is also
/// returned to the caller.
pub struct Dashboard {
    backend: Arc<dyn AnalysisBackend>,
    view: Arc<dyn DashboardView>,
    session: Arc<Session>,
    in_flight: AtomicUsize,
}

impl Dashboard {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        view: Arc<dyn DashboardView>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            backend,
            view,
            session,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn upload_and_analyze(
        &self,
        paths: &[PathBuf],
    ) -> Result<AnalyzeOutcome, DashboardError> {
        let result = self.try_analyze(paths).await;
        if let Err(e) = &result {
            self.report_error("analyze", e);
        }
        result
    }

    async fn try_analyze(&self, paths: &[PathBuf]) -> Result<AnalyzeOutcome, DashboardError> {
        let charts = load_charts(paths).await?;
        let token = self.session.begin_request();

        self.enter_busy();
        let reply = self.backend.analyze(charts).await;
        self.leave_busy();

        Ok(self.apply_reply(token, reply?))
    }

    fn apply_reply(&self, token: RequestToken, reply: AnalysisReply) -> AnalyzeOutcome {
        let applied = match reply {
            AnalysisReply::Context(reply) => {
                let fields = DisplayFields::from_context(&reply.context);
                let signal = CurrentSignal {
                    id: signal_id_or_synthesized(reply.signal_id.as_ref()),
                    market: fields.market.clone(),
                    pair: fields.pair.clone(),
                };
                let signal_id = signal.id.clone();
                let applied = self
                    .session
                    .commit(token, Some(signal), || self.view.show_signal(&fields));
                if applied {
                    tracing::info!(
                        "Signal {} displayed: {} {} {} @ {}",
                        signal_id,
                        fields.pair,
                        fields.direction,
                        fields.timeframe,
                        fields.entry
                    );
                }
                applied
            }
            AnalysisReply::Status(reply) => {
                let verdict = reply.verdict();
                let applied = self
                    .session
                    .commit(token, None, || self.view.show_verdict(&verdict));
                if applied {
                    tracing::info!("Verdict displayed: {} ({})", verdict.label(), verdict.detail());
                }
                applied
            }
        };

        if applied {
            AnalyzeOutcome::Applied
        } else {
            tracing::debug!("Dropping superseded analyze response {:?}", token);
            AnalyzeOutcome::Superseded
        }
    }

    /// Report a win or loss for the current signal. Duplicate calls send
    /// duplicate reports.
    pub async fn report_feedback(&self, outcome: Outcome) -> Result<f64, DashboardError> {
        let result = self.try_feedback(outcome).await;
        match &result {
            Ok(accuracy) => self.view.alert(&format!(
                "{} recorded. Overall Accuracy: {}%",
                outcome.name(),
                accuracy
            )),
            Err(e) => self.report_error("feedback", e),
        }
        result
    }

    async fn try_feedback(&self, outcome: Outcome) -> Result<f64, DashboardError> {
        let signal = self.session.current().ok_or(DashboardError::NoSignal)?;
        let report = FeedbackReport {
            signal_id: signal.id,
            market: signal.market,
            pair: signal.pair,
            result: outcome,
        };

        let ack = self.backend.send_feedback(&report).await?;
        tracing::info!(
            "{} feedback for {} accepted, overall accuracy {}%",
            outcome.name(),
            report.signal_id,
            ack.overall_accuracy
        );
        Ok(ack.overall_accuracy)
    }

    fn report_error(&self, action: &str, error: &DashboardError) {
        match error {
            DashboardError::NoSignal => tracing::info!("{} rejected: {}", action, error),
            DashboardError::Client(e) if e.is_user_input() => {
                tracing::info!("{} rejected: {}", action, error)
            }
            _ => tracing::warn!(
                "{} via {} backend failed: {}",
                action,
                self.backend.backend_name(),
                error
            ),
        }
        self.view.alert(&error.to_string());
    }

    fn enter_busy(&self) {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.view.set_busy(true);
        }
    }

    fn leave_busy(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.view.set_busy(false);
        }
    }
}

fn signal_id_or_synthesized(id: Option<&FieldValue>) -> String {
    match id.map(FieldValue::to_string) {
        Some(id) if !id.is_empty() => id,
        _ => format!("auto_{}", chrono::Utc::now().timestamp_millis()),
    }
}
