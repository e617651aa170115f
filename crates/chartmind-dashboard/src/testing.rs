//! In-memory view and backend used by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chartmind_client::{
    AnalysisBackend, AnalysisReply, ChartFile, ClientError, ClientResult, FeedbackAck,
    FeedbackReport, NewsItem, StatusVerdict,
};

use crate::view::{DashboardView, DisplayFields, ToastId};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Signal(DisplayFields),
    Verdict(StatusVerdict),
    Alert(String),
    Busy(bool),
    News(Vec<NewsItem>),
    ToastShown(ToastId, String),
    ToastDismissed(ToastId),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Alert(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn last_signal(&self) -> Option<DisplayFields> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Signal(fields) => Some(fields),
            _ => None,
        })
    }

    pub fn news_renders(&self) -> Vec<Vec<NewsItem>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::News(items) => Some(items),
                _ => None,
            })
            .collect()
    }

    /// Toasts shown and not yet dismissed, in order of appearance.
    pub fn active_toasts(&self) -> Vec<(ToastId, String)> {
        let events = self.events();
        let mut active: Vec<(ToastId, String)> = Vec::new();
        for event in events {
            match event {
                ViewEvent::ToastShown(id, msg) => active.push((id, msg)),
                ViewEvent::ToastDismissed(id) => active.retain(|(t, _)| *t != id),
                _ => {}
            }
        }
        active
    }
}

impl DashboardView for RecordingView {
    fn show_signal(&self, fields: &DisplayFields) {
        self.record(ViewEvent::Signal(fields.clone()));
    }

    fn show_verdict(&self, verdict: &StatusVerdict) {
        self.record(ViewEvent::Verdict(verdict.clone()));
    }

    fn alert(&self, message: &str) {
        self.record(ViewEvent::Alert(message.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.record(ViewEvent::Busy(busy));
    }

    fn render_news(&self, items: &[NewsItem]) {
        self.record(ViewEvent::News(items.to_vec()));
    }

    fn show_toast(&self, id: ToastId, message: &str) {
        self.record(ViewEvent::ToastShown(id, message.to_string()));
    }

    fn dismiss_toast(&self, id: ToastId) {
        self.record(ViewEvent::ToastDismissed(id));
    }
}

/// Scripted backend. Each call pops the next queued response; an empty queue
/// behaves like a backend that is down.
#[derive(Default)]
pub struct FakeBackend {
    analyze_replies: Mutex<VecDeque<(Duration, ClientResult<AnalysisReply>)>>,
    feedback_replies: Mutex<VecDeque<ClientResult<FeedbackAck>>>,
    news_replies: Mutex<VecDeque<(Duration, ClientResult<Vec<NewsItem>>)>>,
    pub analyze_calls: AtomicUsize,
    pub news_calls: AtomicUsize,
    pub feedback_sent: Mutex<Vec<FeedbackReport>>,
    pub charts_sent: Mutex<Vec<Vec<ChartFile>>>,
}

impl FakeBackend {
    pub fn queue_analyze(&self, reply: ClientResult<AnalysisReply>) {
        self.queue_analyze_after(Duration::ZERO, reply);
    }

    /// Queue a reply that is delivered only after `delay`.
    pub fn queue_analyze_after(&self, delay: Duration, reply: ClientResult<AnalysisReply>) {
        self.analyze_replies.lock().unwrap().push_back((delay, reply));
    }

    pub fn queue_feedback(&self, reply: ClientResult<FeedbackAck>) {
        self.feedback_replies.lock().unwrap().push_back(reply);
    }

    pub fn queue_news(&self, reply: ClientResult<Vec<NewsItem>>) {
        self.queue_news_after(Duration::ZERO, reply);
    }

    pub fn queue_news_after(&self, delay: Duration, reply: ClientResult<Vec<NewsItem>>) {
        self.news_replies.lock().unwrap().push_back((delay, reply));
    }
}

fn backend_down<T>() -> ClientResult<T> {
    Err(ClientError::Backend("no scripted reply".to_string()))
}

async fn delayed<T>(next: Option<(Duration, ClientResult<T>)>) -> ClientResult<T> {
    match next {
        Some((delay, reply)) => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply
        }
        None => backend_down(),
    }
}

#[async_trait]
impl AnalysisBackend for FakeBackend {
    async fn analyze(&self, charts: Vec<ChartFile>) -> ClientResult<AnalysisReply> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.charts_sent.lock().unwrap().push(charts);
        let next = self.analyze_replies.lock().unwrap().pop_front();
        delayed(next).await
    }

    async fn send_feedback(&self, report: &FeedbackReport) -> ClientResult<FeedbackAck> {
        self.feedback_sent.lock().unwrap().push(report.clone());
        self.feedback_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(backend_down)
    }

    async fn fetch_news(&self) -> ClientResult<Vec<NewsItem>> {
        self.news_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.news_replies.lock().unwrap().pop_front();
        delayed(next).await
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}

pub fn news(headline: &str, impact_score: f64) -> NewsItem {
    NewsItem {
        headline: Some(headline.to_string()),
        impact_score,
        source: Some("Reuters".to_string()),
        datetime: None,
    }
}
