use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{AnalysisReply, FeedbackAck, FeedbackReport, NewsItem};
use crate::upload::ChartFile;

/// Backend-agnostic interface to the chart-analysis service.
///
/// Implemented by the HTTP client; tests substitute in-memory fakes.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit charts for analysis. `charts` is never empty.
    async fn analyze(&self, charts: Vec<ChartFile>) -> ClientResult<AnalysisReply>;

    async fn send_feedback(&self, report: &FeedbackReport) -> ClientResult<FeedbackAck>;

    async fn fetch_news(&self) -> ClientResult<Vec<NewsItem>>;

    fn backend_name(&self) -> &'static str;
}
