pub mod error;
pub mod http;
pub mod models;
pub mod provider;
pub mod upload;

pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use models::{
    AnalysisReply, ContextReply, FeedbackAck, FeedbackReport, FieldValue, NewsItem, Outcome,
    ResponseContract, SignalContext, StatusReply, StatusVerdict,
};
pub use provider::AnalysisBackend;
pub use upload::{load_charts, ChartFile};

use std::time::Duration;

/// Connection settings for the analysis backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub contract: ResponseContract,
    /// `market` form field sent with the status contract.
    pub market: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            contract: ResponseContract::Context,
            market: "binary".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_contract(mut self, contract: ResponseContract) -> Self {
        self.contract = contract;
        self
    }
}
