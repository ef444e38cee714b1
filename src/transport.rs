use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

/// reqwest-backed transport. No timeout is set; a slow server keeps the request open.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Client { message: e.to_string() })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request { url: url.to_string(), message: e.to_string() })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body { url: url.to_string(), message: e.to_string() })?;
        debug!(%url, status, bytes = body.len(), "response");
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_user_agent_is_a_client_error() {
        let err = HttpTransport::new("bad\nagent").err().unwrap();
        assert!(matches!(err, TransportError::Client { .. }), "{err:?}");
        assert!(err.to_string().starts_with("failed to build HTTP client"));
        assert!(HttpTransport::new("sitecards-test").is_ok());
    }
}
