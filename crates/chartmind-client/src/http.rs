use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};
use crate::models::{AnalysisReply, FeedbackAck, FeedbackReport, NewsItem, NewsPayload, ResponseContract};
use crate::provider::AnalysisBackend;
use crate::upload::ChartFile;
use crate::ClientConfig;

/// Error body the backend sends with 4xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed implementation of [`AnalysisBackend`].
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    contract: ResponseContract,
    market: String,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("chartmind/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            contract: config.contract,
            market: config.market,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn contract(&self) -> ResponseContract {
        self.contract
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn chart_part(chart: ChartFile) -> ClientResult<Part> {
        Ok(Part::bytes(chart.bytes)
            .file_name(chart.file_name)
            .mime_str(chart.mime)?)
    }

    fn build_form(&self, charts: Vec<ChartFile>) -> ClientResult<Form> {
        let mut form = Form::new();
        match self.contract {
            ResponseContract::Context => {
                for chart in charts {
                    form = form.part("charts", Self::chart_part(chart)?);
                }
            }
            ResponseContract::Status => {
                let Some(chart) = charts.into_iter().next() else {
                    return Err(ClientError::NoFileSelected);
                };
                form = form
                    .part("chart", Self::chart_part(chart)?)
                    .text("market", self.market.clone())
                    .text("timestamp", chrono::Utc::now().timestamp().to_string());
            }
        }
        Ok(form)
    }

    /// Turn a non-success answer into an error, preferring the backend's own
    /// `{ "error": ... }` message over the bare status code.
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => Err(ClientError::Backend(error)),
            Err(_) => Err(ClientError::Status(status)),
        }
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, charts: Vec<ChartFile>) -> ClientResult<AnalysisReply> {
        let count = charts.len();
        let form = self.build_form(charts)?;

        tracing::info!(
            "Submitting {} chart(s) to {} ({} contract)",
            count,
            self.url("/analyze"),
            self.contract
        );

        let response = self
            .client
            .post(self.url("/analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body = Self::check_status(response).await?.bytes().await?;
        self.contract.decode(&body)
    }

    async fn send_feedback(&self, report: &FeedbackReport) -> ClientResult<FeedbackAck> {
        let response = self
            .client
            .post(self.url("/feedback"))
            .json(report)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body = Self::check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_news(&self) -> ClientResult<Vec<NewsItem>> {
        let response = self
            .client
            .get(self.url("/news"))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body = Self::check_status(response).await?.bytes().await?;
        serde_json::from_slice::<NewsPayload>(&body)?.into_items()
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
