//! Canonical domain entities
//!
//! Immutable, backend-agnostic value objects. Entities are constructed once
//! per parsed backend response (or cache hit) and never mutated. Relationships
//! such as `Site::server_id` are informational foreign-key strings; the
//! backing data lives entirely in the remote panel, so they are never
//! validated against a second entity.
//!
//! Identifying fields default to the empty string rather than an `Option`,
//! so an entity is always constructible from partial data.

use crate::domain::status::{
    BackupStatus, BackupType, DeploymentStatus, ServerStatus, SiteStatus, SslStatus,
};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// =============================================================================
// Server
// =============================================================================

/// A managed server (VPS or bare-metal) on a hosting panel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub ip_address: String,
    pub region: String,
    pub size: String,
    pub php_version: String,
    pub status: ServerStatus,
    /// Point-in-time metrics, when the backend embeds them
    pub metrics: Option<ServerMetrics>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Server {
    /// Whether the server is ready to accept operations
    pub fn is_active(&self) -> bool {
        self.status == ServerStatus::Active
    }
}

// =============================================================================
// Site
// =============================================================================

/// A site (virtual host) deployed on a server
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub server_id: String,
    pub domain: String,
    pub php_version: String,
    pub ssl_enabled: bool,
    pub ssl_status: SslStatus,
    /// Alternate domains, in backend order
    pub aliases: IndexSet<String>,
    pub status: SiteStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Site {
    /// Whether the site serves traffic over a live certificate
    pub fn has_valid_ssl(&self) -> bool {
        self.ssl_enabled && self.ssl_status == SslStatus::Active
    }
}

// =============================================================================
// Database / Database User / System User
// =============================================================================

/// A database on a server
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub name: String,
    pub server_id: String,
}

/// A database user and the databases it may access
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatabaseUser {
    pub id: String,
    pub username: String,
    pub server_id: String,
    pub databases: IndexSet<String>,
}

/// A system (SSH) user on a server
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemUser {
    pub id: String,
    pub username: String,
    pub server_id: String,
}

// =============================================================================
// SSL Certificate
// =============================================================================

/// An SSL certificate bound to a site
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SslCertificate {
    pub id: String,
    pub site_id: String,
    pub domains: Vec<String>,
    pub status: SslStatus,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SslCertificate {
    /// Active and not past its expiry timestamp
    pub fn is_valid(&self) -> bool {
        self.status == SslStatus::Active
            && self.expires_at.map_or(true, |expiry| expiry > Utc::now())
    }
}

// =============================================================================
// Deployment
// =============================================================================

/// A single deployment run for a site
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub site_id: String,
    pub commit_hash: String,
    pub status: DeploymentStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Deployment {
    /// Wall-clock duration, derived when both timestamps are present
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => {
                Some(finished.signed_duration_since(started).num_seconds())
            }
            _ => None,
        }
    }
}

// =============================================================================
// Backup
// =============================================================================

/// A backup of a site's data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Backup {
    pub id: String,
    pub site_id: String,
    pub backup_type: BackupType,
    pub status: BackupStatus,
    pub size_bytes: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Server Metrics
// =============================================================================

/// Load averages over the standard sampling windows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one_minute: f64,
    pub five_minutes: f64,
    pub fifteen_minutes: f64,
}

/// Thresholds above which a metric is considered critical (percentages)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholds {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self {
            cpu_percent: 90.0,
            memory_percent: 90.0,
            disk_percent: 85.0,
        }
    }
}

/// Point-in-time resource usage for a server. All fields optional: backends
/// report whichever subset they measure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerMetrics {
    /// CPU usage percentage (0-100)
    pub cpu_usage: Option<f64>,
    /// Memory usage percentage (0-100)
    pub memory_usage: Option<f64>,
    /// Disk usage percentage (0-100)
    pub disk_usage: Option<f64>,
    pub load_average: Option<LoadAverage>,
}

impl ServerMetrics {
    /// Whether any reported metric breaches its threshold
    pub fn is_critical(&self, thresholds: &MetricThresholds) -> bool {
        self.cpu_usage.map_or(false, |v| v >= thresholds.cpu_percent)
            || self
                .memory_usage
                .map_or(false, |v| v >= thresholds.memory_percent)
            || self
                .disk_usage
                .map_or(false, |v| v >= thresholds.disk_percent)
    }
}

// =============================================================================
// Connection Result
// =============================================================================

/// Outcome of a connectivity probe against a backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectionResult {
    pub success: bool,
    pub message: String,
    pub status_code: Option<u16>,
    pub latency_ms: Option<u64>,
}

impl ConnectionResult {
    /// Successful probe
    pub fn ok(message: impl Into<String>, status_code: u16, latency_ms: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            status_code: Some(status_code),
            latency_ms: Some(latency_ms),
        }
    }

    /// Failed probe
    pub fn failed(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code,
            latency_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_site_valid_ssl_requires_both_flags() {
        let site = Site {
            ssl_enabled: true,
            ssl_status: SslStatus::Active,
            ..Default::default()
        };
        assert!(site.has_valid_ssl());

        let disabled = Site {
            ssl_enabled: false,
            ssl_status: SslStatus::Active,
            ..Default::default()
        };
        assert!(!disabled.has_valid_ssl());

        let pending = Site {
            ssl_enabled: true,
            ssl_status: SslStatus::Pending,
            ..Default::default()
        };
        assert!(!pending.has_valid_ssl());
    }

    #[test]
    fn test_certificate_validity() {
        let future = Utc::now() + chrono::Duration::days(30);
        let cert = SslCertificate {
            status: SslStatus::Active,
            expires_at: Some(future),
            ..Default::default()
        };
        assert!(cert.is_valid());

        let expired = SslCertificate {
            status: SslStatus::Active,
            expires_at: Some(Utc::now() - chrono::Duration::days(1)),
            ..Default::default()
        };
        assert!(!expired.is_valid());

        let failed = SslCertificate {
            status: SslStatus::Failed,
            expires_at: Some(future),
            ..Default::default()
        };
        assert!(!failed.is_valid());
    }

    #[test]
    fn test_deployment_duration() {
        let started = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let finished = Utc.with_ymd_and_hms(2025, 1, 1, 10, 5, 0).unwrap();

        let deployment = Deployment {
            started_at: Some(started),
            finished_at: Some(finished),
            ..Default::default()
        };
        assert_eq!(deployment.duration_seconds(), Some(300));

        let running = Deployment {
            started_at: Some(started),
            finished_at: None,
            ..Default::default()
        };
        assert_eq!(running.duration_seconds(), None);
    }

    #[test]
    fn test_metrics_critical_thresholds() {
        let thresholds = MetricThresholds::default();

        let healthy = ServerMetrics {
            cpu_usage: Some(35.0),
            memory_usage: Some(60.0),
            disk_usage: Some(40.0),
            load_average: None,
        };
        assert!(!healthy.is_critical(&thresholds));

        let hot = ServerMetrics {
            cpu_usage: Some(97.5),
            ..Default::default()
        };
        assert!(hot.is_critical(&thresholds));

        let empty = ServerMetrics::default();
        assert!(!empty.is_critical(&thresholds));
    }

    #[test]
    fn test_entities_constructible_from_partial_data() {
        let server = Server::default();
        assert_eq!(server.id, "");
        assert_eq!(server.status, ServerStatus::Unknown);
        assert!(server.metrics.is_none());
    }
}
