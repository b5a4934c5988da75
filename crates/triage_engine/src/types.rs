use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Body of a successful classification response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassifyResponse {
    pub status: String,
    pub category: Option<String>,
    pub confidence: Option<f64>,
    pub email_type: Option<String>,
    pub suggested_response: Option<String>,
    pub error: Option<String>,
    pub saved_id: Option<u64>,
    /// Kind of input the service processed; stands in for `email_type` when that is absent.
    pub input_type: Option<String>,
}

impl ClassifyResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

/// One stored history entry as served by the history endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub category: String,
    #[serde(alias = "aiConfidence")]
    pub ai_confidence: Option<f64>,
    #[serde(alias = "textPreview")]
    pub text_preview: Option<String>,
    #[serde(alias = "responsePreview")]
    pub response_preview: Option<String>,
    #[serde(alias = "emailType")]
    pub email_type: Option<String>,
    #[serde(alias = "analyzedAt")]
    pub analyzed_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HistoryCounts {
    pub total: u64,
    pub produtivos: u64,
    pub improdutivos: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Classified {
        request_id: RequestId,
        result: Result<ClassifyResponse, ApiError>,
    },
    HistoryListed {
        request_id: RequestId,
        result: Result<Vec<HistoryEntry>, ApiError>,
    },
    StatsLoaded {
        request_id: RequestId,
        result: Result<HistoryCounts, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// Human-readable message taken from the service's error body.
    pub detail: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidPayload,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidPayload => write!(f, "invalid payload"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
