//! Rolling-window rate limiting
//!
//! One fixed 60-second window per backend name, shared by every caller of
//! the registry. Check-and-increment happens while holding the map's shard
//! lock, so a ceiling can never be exceeded; races only over-restrict.

use crate::error::{Error, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Width of the rolling window
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

// =============================================================================
// Rate Limiter Port
// =============================================================================

/// Port for rate-limit enforcement, injected into the request pipeline
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one hit for `backend`, or reject with `Error::RateLimited`
    /// carrying the remaining window time
    async fn acquire(&self, backend: &str, ceiling: u32) -> Result<()>;

    /// Hits recorded in the backend's current window
    async fn current_hits(&self, backend: &str) -> u32;
}

/// Type alias for Arc'd limiters
pub type RateLimiterRef = Arc<dyn RateLimiter>;

// =============================================================================
// Rolling Window Limiter
// =============================================================================

struct WindowSlot {
    started: Instant,
    count: u32,
}

/// In-memory rolling-window limiter keyed by backend name
pub struct RollingWindowLimiter {
    window: Duration,
    slots: DashMap<String, WindowSlot>,
}

impl RollingWindowLimiter {
    /// Create a limiter with the standard 60-second window
    pub fn new() -> Self {
        Self::with_window(RATE_WINDOW)
    }

    /// Create a limiter with a custom window width
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            slots: DashMap::new(),
        }
    }
}

impl Default for RollingWindowLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for RollingWindowLimiter {
    async fn acquire(&self, backend: &str, ceiling: u32) -> Result<()> {
        // entry() holds the shard lock for the whole check-and-increment
        let mut slot = self
            .slots
            .entry(backend.to_string())
            .or_insert_with(|| WindowSlot {
                started: Instant::now(),
                count: 0,
            });

        if slot.started.elapsed() >= self.window {
            slot.started = Instant::now();
            slot.count = 0;
        }

        if slot.count >= ceiling {
            let remaining = self.window.saturating_sub(slot.started.elapsed());
            let retry_after_secs = remaining.as_secs().max(1);
            debug!(
                backend,
                ceiling, retry_after_secs, "rate ceiling reached, rejecting request"
            );
            return Err(Error::rate_limited(backend, retry_after_secs));
        }

        slot.count += 1;
        Ok(())
    }

    async fn current_hits(&self, backend: &str) -> u32 {
        self.slots
            .get(backend)
            .filter(|slot| slot.started.elapsed() < self.window)
            .map_or(0, |slot| slot.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_ceiling_rejects_next_call() {
        let limiter = RollingWindowLimiter::new();

        for _ in 0..5 {
            limiter.acquire("forge", 5).await.unwrap();
        }
        assert_eq!(limiter.current_hits("forge").await, 5);

        let err = limiter.acquire("forge", 5).await.unwrap_err();
        assert_matches!(err, Error::RateLimited { retry_after_secs, .. }
            if retry_after_secs > 0 && retry_after_secs <= 60);
    }

    #[tokio::test]
    async fn test_backends_have_independent_windows() {
        let limiter = RollingWindowLimiter::new();

        limiter.acquire("forge", 1).await.unwrap();
        assert!(limiter.acquire("forge", 1).await.is_err());

        // A different backend is unaffected
        limiter.acquire("ploi", 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_window_resets_after_elapse() {
        let limiter = RollingWindowLimiter::with_window(Duration::from_millis(40));

        limiter.acquire("forge", 1).await.unwrap();
        assert!(limiter.acquire("forge", 1).await.is_err());

        tokio::time::sleep(Duration::from_millis(60)).await;
        limiter.acquire("forge", 1).await.unwrap();
        assert_eq!(limiter.current_hits("forge").await, 1);
    }
}
