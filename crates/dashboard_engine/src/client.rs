use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use dashboard_core::{AnalysisRecord, RecordId};

use crate::ApiError;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base path of the data source, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Success payloads arrive wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error payloads arrive as `{"error": "..."}` with a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// The data-source seam. One implementation talks HTTP; tests substitute
/// their own.
#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, ApiError>;
    async fn submit_url(&self, url: &str) -> Result<(), ApiError>;
    async fn fetch_record(&self, id: RecordId) -> Result<AnalysisRecord, ApiError>;
    async fn rerun_records(&self, ids: &[RecordId]) -> Result<(), ApiError>;
    async fn delete_records(&self, ids: &[RecordId]) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("urls"))
            .send()
            .await
            .map_err(map_request_error)?;
        decode_data(response).await
    }

    async fn submit_url(&self, url: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("urls"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(map_request_error)?;
        expect_ack(response).await
    }

    async fn fetch_record(&self, id: RecordId) -> Result<AnalysisRecord, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("urls/{id}")))
            .send()
            .await
            .map_err(map_request_error)?;
        decode_data(response).await
    }

    async fn rerun_records(&self, ids: &[RecordId]) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("urls/rerun"))
            .json(&serde_json::json!({ "ids": ids }))
            .send()
            .await
            .map_err(map_request_error)?;
        expect_ack(response).await
    }

    async fn delete_records(&self, ids: &[RecordId]) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("urls/delete-batch"))
            .json(&serde_json::json!({ "ids": ids }))
            .send()
            .await
            .map_err(map_request_error)?;
        expect_ack(response).await
    }
}

async fn decode_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(backend_error(response).await);
    }
    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(envelope.data)
}

/// Mutation endpoints only acknowledge; the body (if any) is ignored.
async fn expect_ack(response: reqwest::Response) -> Result<(), ApiError> {
    if !response.status().is_success() {
        return Err(backend_error(response).await);
    }
    Ok(())
}

async fn backend_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => status.to_string(),
    };
    ApiError::Backend {
        status: status.as_u16(),
        message,
    }
}

fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
