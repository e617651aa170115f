use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};

// ---------------------------------------------------------------------------
// Scalar values shown verbatim on the dashboard
// ---------------------------------------------------------------------------

/// A scalar from the backend that is displayed as-is.
///
/// The backend is loose about types (`entry` may be `2650.5` or `"2650.5"`),
/// so any JSON string, number or bool is accepted and rendered in its JSON
/// text form. `null`, arrays and objects are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// /analyze — context contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ContextReply {
    #[serde(default)]
    pub signal_id: Option<FieldValue>,
    pub context: SignalContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalContext {
    pub market: FieldValue,
    pub pair: FieldValue,
    pub session: FieldValue,
    pub vision: VisionSummary,
    pub signal: SignalLevels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionSummary {
    pub trend_bias: FieldValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalLevels {
    pub direction: FieldValue,
    pub entry: FieldValue,
    #[serde(rename = "TP")]
    pub take_profit: FieldValue,
    #[serde(rename = "SL")]
    pub stop_loss: FieldValue,
    pub timeframe: FieldValue,
}

// ---------------------------------------------------------------------------
// /analyze — status contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct StatusReply {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub delay_sec: Option<FieldValue>,
    #[serde(default)]
    pub signal: Option<FieldValue>,
    #[serde(default)]
    pub confidence: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusVerdict {
    Blocked { reason: String },
    Warning { delay_sec: String },
    Normal { signal: String, confidence: String },
}

fn or_placeholder(value: &Option<FieldValue>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

impl StatusReply {
    pub fn verdict(&self) -> StatusVerdict {
        match self.status.as_str() {
            "blocked" => StatusVerdict::Blocked {
                reason: self.reason.clone().unwrap_or_default(),
            },
            "warning" => StatusVerdict::Warning {
                delay_sec: or_placeholder(&self.delay_sec),
            },
            _ => StatusVerdict::Normal {
                signal: or_placeholder(&self.signal),
                confidence: or_placeholder(&self.confidence),
            },
        }
    }
}

impl StatusVerdict {
    /// Headline shown in the signal slot.
    pub fn label(&self) -> String {
        match self {
            StatusVerdict::Blocked { .. } => "NO TRADE".to_string(),
            StatusVerdict::Warning { .. } => "RISKY".to_string(),
            StatusVerdict::Normal { signal, .. } => signal.clone(),
        }
    }

    /// Secondary line shown in the confidence slot.
    pub fn detail(&self) -> String {
        match self {
            StatusVerdict::Blocked { reason } => reason.clone(),
            StatusVerdict::Warning { delay_sec } => format!("Late by {} sec", delay_sec),
            StatusVerdict::Normal { confidence, .. } => format!("Confidence: {}%", confidence),
        }
    }
}

// ---------------------------------------------------------------------------
// Response contract selection
// ---------------------------------------------------------------------------

/// Which `/analyze` response shape the backend speaks.
///
/// Chosen once by configuration; a response is never sniffed to guess its
/// contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseContract {
    #[default]
    Context,
    Status,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown response contract '{0}' (expected 'context' or 'status')")]
pub struct UnknownContract(pub String);

impl FromStr for ResponseContract {
    type Err = UnknownContract;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "context" => Ok(ResponseContract::Context),
            "status" => Ok(ResponseContract::Status),
            other => Err(UnknownContract(other.to_string())),
        }
    }
}

impl fmt::Display for ResponseContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseContract::Context => f.write_str("context"),
            ResponseContract::Status => f.write_str("status"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AnalysisReply {
    Context(ContextReply),
    Status(StatusReply),
}

impl ResponseContract {
    pub fn decode(&self, body: &[u8]) -> ClientResult<AnalysisReply> {
        match self {
            ResponseContract::Context => {
                Ok(AnalysisReply::Context(serde_json::from_slice(body)?))
            }
            ResponseContract::Status => Ok(AnalysisReply::Status(serde_json::from_slice(body)?)),
        }
    }
}

// ---------------------------------------------------------------------------
// /feedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Loss => "Loss",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub signal_id: String,
    pub market: String,
    pub pair: String,
    pub result: Outcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackAck {
    pub overall_accuracy: f64,
}

// ---------------------------------------------------------------------------
// /news
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// The backend forwards these from its news provider and may send `null`.
    #[serde(default)]
    pub headline: Option<String>,
    pub impact_score: f64,
    #[serde(default)]
    pub source: Option<String>,
    /// Unix seconds, when the backend supplies it.
    #[serde(default)]
    pub datetime: Option<i64>,
}

impl NewsItem {
    pub fn headline_text(&self) -> &str {
        self.headline.as_deref().unwrap_or("n/a")
    }

    pub fn source_text(&self) -> &str {
        self.source.as_deref().unwrap_or("n/a")
    }
}

/// The news endpoint answers either with a list or with `{ "error": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NewsPayload {
    Items(Vec<NewsItem>),
    Failure { error: String },
}

impl NewsPayload {
    pub(crate) fn into_items(self) -> ClientResult<Vec<NewsItem>> {
        match self {
            NewsPayload::Items(items) => Ok(items),
            NewsPayload::Failure { error } => Err(ClientError::Backend(error)),
        }
    }
}
