use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use triage_logging::{triage_debug, triage_warn};

use crate::detail::extract_detail;
use crate::{
    ApiError, ClassifyResponse, Endpoint, FailureKind, HistoryCounts, HistoryEntry, HistoryFilter,
    Payload,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Where the service mounts its routers, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for a whole request; a stuck classification surfaces as a timeout.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The remote classification and history service.
#[async_trait::async_trait]
pub trait TriageApi: Send + Sync {
    async fn classify(&self, payload: Payload) -> Result<ClassifyResponse, ApiError>;

    async fn list_history(&self, filter: HistoryFilter) -> Result<Vec<HistoryEntry>, ApiError>;

    async fn history_stats(&self) -> Result<HistoryCounts, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn url(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?;
            segments.pop_if_empty();
            for segment in endpoint.segments() {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = self.read_body(response).await?;
        triage_debug!("{} answered {} ({} bytes)", endpoint.path(), status, body.len());

        if !status.is_success() {
            let detail = extract_detail(&body);
            triage_warn!(
                "{} failed with {}: {}",
                endpoint.path(),
                status,
                detail.as_deref().unwrap_or("no detail")
            );
            return Err(
                ApiError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(detail),
            );
        }

        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl TriageApi for ReqwestClient {
    async fn classify(&self, payload: Payload) -> Result<ClassifyResponse, ApiError> {
        let endpoint = payload.endpoint();
        let url = self.url(&endpoint)?;
        let form = payload.into_form()?;
        self.execute(&endpoint, self.client.post(url).multipart(form))
            .await
    }

    async fn list_history(&self, filter: HistoryFilter) -> Result<Vec<HistoryEntry>, ApiError> {
        let endpoint = Endpoint::History(filter);
        let url = self.url(&endpoint)?;
        self.execute(&endpoint, self.client.get(url)).await
    }

    async fn history_stats(&self) -> Result<HistoryCounts, ApiError> {
        let endpoint = Endpoint::HistoryStats;
        let url = self.url(&endpoint)?;
        self.execute(&endpoint, self.client.get(url)).await
    }
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
