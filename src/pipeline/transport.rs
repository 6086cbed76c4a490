//! HTTP transport
//!
//! The pipeline talks to backends through the `HttpTransport` port so the
//! wire layer can be swapped for a scripted double in tests. The reqwest
//! implementation applies one fixed timeout per call; retry policy lives in
//! the pipeline, not here.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// HTTP Method
// =============================================================================

/// Request methods the bridge issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Raw Response
// =============================================================================

/// Unclassified transport result
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Server-provided Retry-After, in seconds
    pub retry_after: Option<u64>,
    pub duration: Duration,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// Transport Port
// =============================================================================

/// Port for the wire layer. Errors are connection-level failures only;
/// HTTP-level failures come back as a `RawResponse` for classification.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<RawResponse>;
}

/// Type alias for Arc'd transports
pub type TransportRef = Arc<dyn HttpTransport>;

// =============================================================================
// Reqwest Transport
// =============================================================================

/// Production transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with one fixed per-call timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let reqwest_method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut request = self
            .client
            .request(reqwest_method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok());
        let body = response.text().await.map_err(Error::Http)?;

        Ok(RawResponse {
            status,
            body,
            retry_after,
            duration: started.elapsed(),
        })
    }
}
