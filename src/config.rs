//! Configuration consumed by the registry and request pipeline
//!
//! The bridge consumes configuration, it does not own loading: callers hand
//! a [`ManagerConfig`] (typically deserialized from their own config source)
//! to the registry, which merges the global section with the per-driver
//! section when constructing a provider. Credential contents are passed
//! through opaquely.

use crate::domain::entities::MetricThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

// =============================================================================
// Cache TTLs
// =============================================================================

/// Cache TTLs per resource class, in seconds. A TTL of zero disables caching
/// for that class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheTtlConfig {
    pub servers: u64,
    pub sites: u64,
    pub ssl: u64,
    pub databases: u64,
    pub deployments: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            servers: 300,
            sites: 300,
            ssl: 3600,
            databases: 300,
            deployments: 60,
        }
    }
}

// =============================================================================
// Global Configuration
// =============================================================================

/// Settings shared by every driver, overridable per driver where noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub cache_enabled: bool,
    pub cache_prefix: String,
    pub cache_ttl: CacheTtlConfig,
    pub rate_limit_enabled: bool,
    /// Global ceiling override; when unset each driver's own default applies
    pub requests_per_minute: Option<u32>,
    /// Fixed transport timeout
    pub timeout_secs: u64,
    /// Retry budget for transient connection failures
    pub max_retries: u32,
    /// Fixed delay between transient retries
    pub retry_delay_ms: u64,
    pub metric_thresholds: MetricThresholds,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_prefix: "hostbridge".to_string(),
            cache_ttl: CacheTtlConfig::default(),
            rate_limit_enabled: true,
            requests_per_minute: None,
            timeout_secs: 30,
            max_retries: 2,
            retry_delay_ms: 500,
            metric_thresholds: MetricThresholds::default(),
        }
    }
}

impl GlobalConfig {
    /// Transport timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry delay as a `Duration`
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

// =============================================================================
// Per-Driver Settings
// =============================================================================

/// Configuration for one driver. The registry never inspects credential
/// contents; it only checks presence where a driver asks it to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Profile name, when registering a custom entry backed by a stock driver
    pub driver: Option<String>,
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Per-driver ceiling override
    pub requests_per_minute: Option<u32>,
    /// Backend-specific extras (team ids, workspace slugs, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl DriverSettings {
    /// Look up a backend-specific extra field
    pub fn extra_field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    fn is_present(value: &Option<String>) -> bool {
        value.as_deref().map_or(false, |v| !v.trim().is_empty())
    }

    /// A non-empty bearer/header token is present
    pub fn has_token(&self) -> bool {
        Self::is_present(&self.api_token)
    }

    /// A non-empty key/secret pair is present
    pub fn has_key_pair(&self) -> bool {
        Self::is_present(&self.api_key) && Self::is_present(&self.api_secret)
    }
}

// =============================================================================
// Manager Configuration
// =============================================================================

/// Top-level configuration: one global section plus a per-driver map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub global: GlobalConfig,
    pub drivers: BTreeMap<String, DriverSettings>,
}

impl ManagerConfig {
    /// Settings for a driver; absent entries yield defaults so resolution
    /// can still construct an (unconfigured) provider
    pub fn driver_settings(&self, name: &str) -> DriverSettings {
        self.drivers.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert!(config.cache_enabled);
        assert!(config.rate_limit_enabled);
        assert_eq!(config.cache_prefix, "hostbridge");
        assert_eq!(config.cache_ttl.ssl, 3600);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_driver_settings_presence_checks() {
        let empty = DriverSettings::default();
        assert!(!empty.has_token());
        assert!(!empty.has_key_pair());

        let blank = DriverSettings {
            api_token: Some("   ".into()),
            ..Default::default()
        };
        assert!(!blank.has_token());

        let keyed = DriverSettings {
            api_key: Some("k".into()),
            api_secret: Some("s".into()),
            ..Default::default()
        };
        assert!(keyed.has_key_pair());
    }

    #[test]
    fn test_missing_driver_settings_default() {
        let config = ManagerConfig::default();
        let settings = config.driver_settings("forge");
        assert_eq!(settings, DriverSettings::default());
        assert!(!settings.has_token());
    }

    #[test]
    fn test_deserialize_with_extras() {
        let config: ManagerConfig = serde_json::from_value(json!({
            "global": { "cache_enabled": false },
            "drivers": {
                "forge": { "api_token": "tok", "team_id": "t-9" }
            }
        }))
        .unwrap();

        assert!(!config.global.cache_enabled);
        // Unspecified global fields keep their defaults
        assert!(config.global.rate_limit_enabled);

        let forge = config.driver_settings("forge");
        assert!(forge.has_token());
        assert_eq!(forge.extra_field("team_id"), Some("t-9"));
        assert_eq!(forge.extra_field("missing"), None);
    }
}
