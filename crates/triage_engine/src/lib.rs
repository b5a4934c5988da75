//! Mail triage engine: service client and background request execution.
mod client;
mod detail;
mod endpoint;
mod engine;
mod payload;
mod types;

pub use client::{ClientSettings, ReqwestClient, TriageApi};
pub use detail::extract_detail;
pub use endpoint::{Endpoint, HistoryFilter};
pub use engine::EngineHandle;
pub use payload::{Attachment, Payload};
pub use types::{
    ApiError, ClassifyResponse, EngineError, EngineEvent, FailureKind, HistoryCounts,
    HistoryEntry, RequestId,
};
