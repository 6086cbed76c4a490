//! Response caching
//!
//! GET-shaped pipeline calls cache their raw payloads per resource class.
//! Keys compose as `prefix:backend:class:key`; TTLs are configured per class
//! and a TTL of zero means "never cache". The store is registry-scoped and
//! shared by every provider the registry resolves.

use crate::config::CacheTtlConfig;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// Resource Classes
// =============================================================================

/// Cacheable resource classes, each with its own TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceClass {
    Servers,
    Sites,
    Ssl,
    Databases,
    Deployments,
}

impl ResourceClass {
    /// Key segment for this class
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceClass::Servers => "servers",
            ResourceClass::Sites => "sites",
            ResourceClass::Ssl => "ssl",
            ResourceClass::Databases => "databases",
            ResourceClass::Deployments => "deployments",
        }
    }

    /// Configured TTL for this class
    pub fn ttl(&self, config: &CacheTtlConfig) -> Duration {
        let secs = match self {
            ResourceClass::Servers => config.servers,
            ResourceClass::Sites => config.sites,
            ResourceClass::Ssl => config.ssl,
            ResourceClass::Databases => config.databases,
            ResourceClass::Deployments => config.deployments,
        };
        Duration::from_secs(secs)
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compose a full cache key
pub fn cache_key(prefix: &str, backend: &str, class: ResourceClass, key: &str) -> String {
    format!("{}:{}:{}:{}", prefix, backend, class, key)
}

// =============================================================================
// Response Cache Port
// =============================================================================

/// Port for response caching, injected into the request pipeline
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Live entry for the key, if any
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store an entry. A zero TTL is a no-op.
    async fn put(&self, key: &str, value: Value, ttl: Duration);

    /// Drop one entry
    async fn forget(&self, key: &str);

    /// Drop every entry whose key starts with `prefix`
    async fn flush_prefix(&self, prefix: &str);
}

/// Type alias for Arc'd caches
pub type ResponseCacheRef = Arc<dyn ResponseCache>;

// =============================================================================
// In-Memory Cache
// =============================================================================

struct CachedEntry {
    value: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// In-memory response cache backed by DashMap
pub struct MemoryResponseCache {
    entries: DashMap<String, CachedEntry>,
}

impl MemoryResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseCache for MemoryResponseCache {
    async fn get(&self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        // Expired entries are dropped on first lookup past their deadline
        self.entries.remove_if(key, |_, entry| entry.is_expired());
        None
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key.to_string(),
            CachedEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    async fn forget(&self, key: &str) {
        self.entries.remove(key);
    }

    async fn flush_prefix(&self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_key_composition() {
        assert_eq!(
            cache_key("hostbridge", "forge", ResourceClass::Ssl, "site-1"),
            "hostbridge:forge:ssl:site-1"
        );
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let cache = MemoryResponseCache::new();
        let value = json!({ "servers": [{ "id": 1 }] });

        cache
            .put("k", value.clone(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await, Some(value));
    }

    #[tokio::test]
    async fn test_zero_ttl_never_caches() {
        let cache = MemoryResponseCache::new();
        cache.put("k", json!(1), Duration::ZERO).await;
        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MemoryResponseCache::new();
        cache.put("k", json!(1), Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, Some(json!(1)));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_flush_prefix_scopes_to_backend() {
        let cache = MemoryResponseCache::new();
        let ttl = Duration::from_secs(60);
        cache.put("hb:forge:servers:all", json!(1), ttl).await;
        cache.put("hb:forge:sites:all", json!(2), ttl).await;
        cache.put("hb:ploi:servers:all", json!(3), ttl).await;

        cache.flush_prefix("hb:forge:servers:").await;

        assert_eq!(cache.get("hb:forge:servers:all").await, None);
        assert_eq!(cache.get("hb:forge:sites:all").await, Some(json!(2)));
        assert_eq!(cache.get("hb:ploi:servers:all").await, Some(json!(3)));
    }
}
