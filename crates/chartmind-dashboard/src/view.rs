use chartmind_client::{NewsItem, SignalContext, StatusVerdict};

/// The nine fields of the signal panel, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFields {
    pub market: String,
    pub pair: String,
    pub session: String,
    pub trend: String,
    pub direction: String,
    pub entry: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub timeframe: String,
}

impl DisplayFields {
    pub fn from_context(context: &SignalContext) -> Self {
        Self {
            market: context.market.to_string(),
            pair: context.pair.to_string(),
            session: context.session.to_string(),
            trend: context.vision.trend_bias.to_string(),
            direction: context.signal.direction.to_string(),
            entry: context.signal.entry.to_string(),
            take_profit: context.signal.take_profit.to_string(),
            stop_loss: context.signal.stop_loss.to_string(),
            timeframe: context.signal.timeframe.to_string(),
        }
    }

    /// (label, value) pairs for rendering.
    pub fn rows(&self) -> [(&'static str, &str); 9] {
        [
            ("Market", self.market.as_str()),
            ("Pair", self.pair.as_str()),
            ("Session", self.session.as_str()),
            ("Trend", self.trend.as_str()),
            ("Direction", self.direction.as_str()),
            ("Entry", self.entry.as_str()),
            ("TP", self.take_profit.as_str()),
            ("SL", self.stop_loss.as_str()),
            ("Timeframe", self.timeframe.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

/// Everything the dashboard shows to the user.
///
/// `alert` is the blocking, must-acknowledge channel; toasts are transient.
pub trait DashboardView: Send + Sync {
    fn show_signal(&self, fields: &DisplayFields);

    fn show_verdict(&self, verdict: &StatusVerdict);

    fn alert(&self, message: &str);

    fn set_busy(&self, busy: bool);

    /// Replace the whole news panel.
    fn render_news(&self, items: &[NewsItem]);

    fn show_toast(&self, id: ToastId, message: &str);

    fn dismiss_toast(&self, id: ToastId);
}

/// One line of the news panel.
pub fn news_line(item: &NewsItem) -> String {
    format!(
        "{} | Impact: {} | Source: {}",
        item.headline_text(),
        item.impact_score,
        item.source_text()
    )
}
