//! HTTP client for the property analysis service.
//!
//! One endpoint matters: POST /analyze with the listing link. The response
//! body is handed back untouched so the caller can keep it as the verbatim
//! snapshot; parsing is the reader's concern.

use reia_core::report::AnalyzeRequest;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

/// Default analysis service URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Errors surfaced to the submission flow.
///
/// The status/body split exists so the UI can show the failure reason the way
/// the service reported it; no structured error schema is assumed.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to reach analysis service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analysis service error ({status}): {body}")]
    Api { status: StatusCode, body: String },
}

/// Analysis service client.
#[derive(Clone)]
pub struct AnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnalysisClient {
    /// Create a client against the given base URL.
    ///
    /// No request timeout is set: an analysis scrapes and classifies a whole
    /// listing and can legitimately run for minutes, so the transport default
    /// applies. There is no cancellation path either; an issued request runs
    /// to completion or failure.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client with the default base URL.
    pub fn default_client() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a listing link for analysis and return the raw response body.
    ///
    /// Any 2xx status counts as success. On a non-success status the body
    /// text is read and embedded in the error.
    pub async fn analyze(&self, link: &str) -> Result<String, ClientError> {
        let request = AnalyzeRequest {
            link: link.to_string(),
        };

        debug!(link, "Submitting listing for analysis");

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Analysis response received");
        Ok(body)
    }

    /// Check whether the analysis service is reachable.
    pub async fn health_check(&self) -> bool {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await;

        matches!(response, Ok(resp) if resp.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AnalysisClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_request_wire_shape() {
        // The service expects exactly one key, "link", carrying the raw URL.
        let request = AnalyzeRequest {
            link: " https://www.idealista.pt/imovel/34458598/ ".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"link":" https://www.idealista.pt/imovel/34458598/ "}"#
        );
    }
}
