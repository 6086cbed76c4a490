//! Request pipeline
//!
//! Wraps every outbound backend call in a fixed sequence:
//!
//! 1. **Rate limit check** - rolling 60-second window keyed by backend name
//! 2. **Cache lookup** - GET-shaped, cacheable resource classes only
//! 3. **Transport** - fixed timeout; transient connection failures retried a
//!    bounded number of times with a constant backoff
//! 4. **Status classification** - 401/403 to authentication failures, 429 to
//!    a rate-limit rejection honoring `Retry-After`, other non-success to a
//!    generic API error carrying status, endpoint, and duration
//! 5. **Cache population** - on cacheable success, at the class TTL
//!
//! The limiter, cache, and transport are injected ports scoped to the
//! registry that built the pipeline; nothing here is process-global.

pub mod cache;
pub mod rate_limit;
pub mod transport;

pub use cache::{
    cache_key, MemoryResponseCache, ResourceClass, ResponseCache, ResponseCacheRef,
};
pub use rate_limit::{RateLimiter, RateLimiterRef, RollingWindowLimiter, RATE_WINDOW};
pub use transport::{HttpMethod, HttpTransport, RawResponse, ReqwestTransport, TransportRef};

use crate::config::{CacheTtlConfig, GlobalConfig};
use crate::domain::entities::ConnectionResult;
use crate::error::{Error, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Retry-After applied to HTTP 429 responses without the header
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

// =============================================================================
// Pipeline Configuration
// =============================================================================

/// Per-backend pipeline settings, derived from the global section plus the
/// backend's own rate ceiling
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub requests_per_minute: u32,
    pub rate_limit_enabled: bool,
    pub cache_enabled: bool,
    pub cache_prefix: String,
    pub cache_ttl: CacheTtlConfig,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_global(&GlobalConfig::default(), 60)
    }
}

impl PipelineConfig {
    /// Derive pipeline settings from the global section
    pub fn from_global(global: &GlobalConfig, requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            rate_limit_enabled: global.rate_limit_enabled,
            cache_enabled: global.cache_enabled,
            cache_prefix: global.cache_prefix.clone(),
            cache_ttl: global.cache_ttl,
            max_retries: global.max_retries,
            retry_delay: global.retry_delay(),
        }
    }
}

// =============================================================================
// Request Pipeline
// =============================================================================

/// The outbound call path for one backend
pub struct RequestPipeline {
    backend: String,
    base_url: String,
    headers: Vec<(String, String)>,
    transport: TransportRef,
    limiter: RateLimiterRef,
    cache: ResponseCacheRef,
    config: PipelineConfig,
}

impl RequestPipeline {
    pub fn new(
        backend: impl Into<String>,
        base_url: impl Into<String>,
        headers: Vec<(String, String)>,
        transport: TransportRef,
        limiter: RateLimiterRef,
        cache: ResponseCacheRef,
        config: PipelineConfig,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            backend: backend.into(),
            base_url,
            headers,
            transport,
            limiter,
            cache,
            config,
        }
    }

    /// Backend name this pipeline serves
    pub fn backend(&self) -> &str {
        &self.backend
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn check_rate(&self) -> Result<()> {
        if !self.config.rate_limit_enabled {
            return Ok(());
        }
        self.limiter
            .acquire(&self.backend, self.config.requests_per_minute)
            .await
    }

    async fn send_with_retry(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = self.url_for(endpoint);
        let attempts = AtomicU32::new(0);
        let policy = backoff::ExponentialBackoffBuilder::new()
            .with_initial_interval(self.config.retry_delay)
            .with_multiplier(1.0)
            .with_randomization_factor(0.0)
            .with_max_interval(self.config.retry_delay)
            .with_max_elapsed_time(None)
            .build();

        backoff::future::retry(policy, || async {
            match self.transport.send(method, &url, &self.headers, payload).await {
                Ok(raw) => Ok(raw),
                Err(err)
                    if err.is_transient()
                        && attempts.fetch_add(1, Ordering::Relaxed) < self.config.max_retries =>
                {
                    warn!(
                        backend = %self.backend,
                        %method,
                        endpoint,
                        error = %err,
                        "transient transport failure, retrying"
                    );
                    Err(backoff::Error::transient(err))
                }
                Err(err) => Err(backoff::Error::permanent(err)),
            }
        })
        .await
    }

    fn classify(&self, method: HttpMethod, endpoint: &str, raw: RawResponse) -> Result<Value> {
        let duration_ms = raw.duration.as_millis() as u64;

        if raw.is_success() {
            let trimmed = raw.body.trim();
            if trimmed.is_empty() {
                return Ok(Value::Object(serde_json::Map::new()));
            }
            return serde_json::from_str(trimmed).map_err(Error::JsonParse);
        }

        warn!(
            backend = %self.backend,
            %method,
            endpoint,
            status = raw.status,
            duration_ms,
            "backend request failed"
        );

        match raw.status {
            401 => Err(Error::invalid_credentials(&self.backend)),
            403 => Err(Error::insufficient_permissions(&self.backend)),
            429 => Err(Error::rate_limited(
                &self.backend,
                raw.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            )),
            status => Err(Error::Api {
                provider: self.backend.clone(),
                status,
                endpoint: endpoint.to_string(),
                duration_ms,
                message: body_snippet(&raw.body),
            }),
        }
    }

    /// Execute an uncached call through the full pipeline
    pub async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<Value>,
    ) -> Result<Value> {
        self.check_rate().await?;
        let raw = self.send_with_retry(method, endpoint, payload.as_ref()).await?;
        self.classify(method, endpoint, raw)
    }

    /// Execute a GET-shaped call with cache lookup and population
    pub async fn execute_cached(
        &self,
        class: ResourceClass,
        resource_key: &str,
        endpoint: &str,
    ) -> Result<Value> {
        self.check_rate().await?;

        let ttl = class.ttl(&self.config.cache_ttl);
        let cacheable = self.config.cache_enabled && !ttl.is_zero();
        let key = cache_key(&self.config.cache_prefix, &self.backend, class, resource_key);

        if cacheable {
            if let Some(hit) = self.cache.get(&key).await {
                debug!(backend = %self.backend, key = %key, "response cache hit");
                return Ok(hit);
            }
        }

        let raw = self.send_with_retry(HttpMethod::Get, endpoint, None).await?;
        let value = self.classify(HttpMethod::Get, endpoint, raw)?;

        if cacheable {
            self.cache.put(&key, value.clone(), ttl).await;
        }
        Ok(value)
    }

    /// Drop one cached entry
    pub async fn invalidate(&self, class: ResourceClass, resource_key: &str) {
        let key = cache_key(&self.config.cache_prefix, &self.backend, class, resource_key);
        self.cache.forget(&key).await;
    }

    /// Drop every cached entry of a resource class for this backend
    pub async fn invalidate_class(&self, class: ResourceClass) {
        let prefix = format!("{}:{}:{}:", self.config.cache_prefix, self.backend, class);
        self.cache.flush_prefix(&prefix).await;
    }

    /// Connectivity probe. Never errors; the outcome is the result value.
    pub async fn probe(&self, endpoint: &str) -> ConnectionResult {
        if let Err(err) = self.check_rate().await {
            return ConnectionResult::failed(err.to_string(), err.status_code());
        }

        match self.send_with_retry(HttpMethod::Get, endpoint, None).await {
            Ok(raw) if raw.is_success() => ConnectionResult::ok(
                format!("{} reachable", self.backend),
                raw.status,
                raw.duration.as_millis() as u64,
            ),
            Ok(raw) => ConnectionResult::failed(
                format!("probe returned HTTP {}", raw.status),
                Some(raw.status),
            ),
            Err(err) => ConnectionResult::failed(err.to_string(), err.status_code()),
        }
    }
}

fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "request failed".to_string();
    }
    trimmed.chars().take(200).collect()
}
