use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::outage::{Outage, OutagesResponse};

pub const OUTAGES_PATH: &str = "/api/public/outages/all";

/// Every variant is a transport failure: the caller shows it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not reach the outage service: {0}")]
    Network(String),
    #[error("Outage service responded with status {status}")]
    Status { status: u16, body: String },
    #[error("Outage service returned an unreadable response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait OutageFetcher: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Outage>, FetchError>;
}

pub struct HttpOutageClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpOutageClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn outages_url(&self) -> String {
        format!("{}{}", self.base_url, OUTAGES_PATH)
    }
}

#[async_trait]
impl OutageFetcher for HttpOutageClient {
    async fn fetch_all(&self) -> Result<Vec<Outage>, FetchError> {
        let url = self.outages_url();
        debug!(%url, "fetching outages");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "outage request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: OutagesResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!(count = parsed.data.len(), "outages received");
        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = HttpOutageClient::new("http://localhost:8080/");
        assert_eq!(
            client.outages_url(),
            "http://localhost:8080/api/public/outages/all"
        );
    }

    #[test]
    fn status_error_message_is_readable() {
        let err = FetchError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Outage service responded with status 500");
    }
}
