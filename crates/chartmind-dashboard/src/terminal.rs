use std::io::Write;
use std::sync::Mutex;

use chartmind_client::{NewsItem, StatusVerdict};
use chrono::{TimeZone, Utc};

use crate::view::{news_line, DashboardView, DisplayFields, ToastId};

/// Line-oriented rendering of the dashboard on stdout.
///
/// A terminal cannot take back printed lines, so a dismissed toast is only
/// logged. The last news panel is kept so it can be reprinted on demand.
#[derive(Default)]
pub struct TerminalView {
    last_news: Mutex<Vec<NewsItem>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    fn print(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }

    pub fn print_news(&self) {
        let items = self
            .last_news
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        self.print(&format_news_panel(&items));
    }
}

fn format_news_panel(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "── News ──\n  (no news)".to_string();
    }

    let mut panel = String::from("── News ──");
    for item in items {
        panel.push_str("\n  ");
        if let Some(ts) = item.datetime.and_then(|t| Utc.timestamp_opt(t, 0).single()) {
            panel.push_str(&ts.format("%H:%M ").to_string());
        }
        panel.push_str(&news_line(item));
    }
    panel
}

impl DashboardView for TerminalView {
    fn show_signal(&self, fields: &DisplayFields) {
        let mut panel = String::from("── Signal ──");
        for (label, value) in fields.rows() {
            panel.push_str(&format!("\n  {:<10} {}", label, value));
        }
        self.print(&panel);
    }

    fn show_verdict(&self, verdict: &StatusVerdict) {
        self.print(&format!(
            "── Verdict ──\n  {}\n  {}",
            verdict.label(),
            verdict.detail()
        ));
    }

    fn alert(&self, message: &str) {
        self.print(&format!("[!] {}", message));
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            self.print("Analyzing...");
        }
    }

    fn render_news(&self, items: &[NewsItem]) {
        *self.last_news.lock().unwrap_or_else(|e| e.into_inner()) = items.to_vec();
        tracing::debug!("News panel updated with {} items", items.len());
    }

    fn show_toast(&self, id: ToastId, message: &str) {
        self.print(&format!(">>> [{}] {}", id.0, message));
    }

    fn dismiss_toast(&self, id: ToastId) {
        tracing::debug!("Toast {} dismissed", id.0);
    }
}
