//! Canonical status enumerations
//!
//! Every backend reports lifecycle state in its own vocabulary ("running",
//! "ok", "live", ...). These closed enums are the canonical form; parsing is
//! total — unrecognized or absent input maps to `Unknown`, never an error.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Server Status
// =============================================================================

/// Lifecycle state of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Provisioning,
    Active,
    Inactive,
    Rebooting,
    Failed,
    Deleting,
    Unknown,
}

impl ServerStatus {
    /// Parse a raw backend status string. Total: never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "provisioning" | "installing" | "building" | "creating" | "pending" => {
                ServerStatus::Provisioning
            }
            "active" | "running" | "ok" | "online" | "ready" => ServerStatus::Active,
            "inactive" | "stopped" | "offline" | "powered_off" | "off" => ServerStatus::Inactive,
            "rebooting" | "restarting" => ServerStatus::Rebooting,
            "failed" | "error" | "broken" => ServerStatus::Failed,
            "deleting" | "destroying" | "terminating" => ServerStatus::Deleting,
            _ => ServerStatus::Unknown,
        }
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Provisioning => "provisioning",
            ServerStatus::Active => "active",
            ServerStatus::Inactive => "inactive",
            ServerStatus::Rebooting => "rebooting",
            ServerStatus::Failed => "failed",
            ServerStatus::Deleting => "deleting",
            ServerStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ServerStatus {
    fn default() -> Self {
        ServerStatus::Unknown
    }
}

// =============================================================================
// Site Status
// =============================================================================

/// Lifecycle state of a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Installing,
    Active,
    Suspended,
    Maintenance,
    Failed,
    Deleting,
    Unknown,
}

impl SiteStatus {
    /// Parse a raw backend status string. Total: never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "installing" | "creating" | "building" | "pending" | "provisioning" => {
                SiteStatus::Installing
            }
            "active" | "running" | "ok" | "live" | "deployed" | "enabled" => SiteStatus::Active,
            "suspended" | "disabled" | "paused" => SiteStatus::Suspended,
            "maintenance" | "updating" => SiteStatus::Maintenance,
            "failed" | "error" | "broken" => SiteStatus::Failed,
            "deleting" | "removing" | "destroying" => SiteStatus::Deleting,
            _ => SiteStatus::Unknown,
        }
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Installing => "installing",
            SiteStatus::Active => "active",
            SiteStatus::Suspended => "suspended",
            SiteStatus::Maintenance => "maintenance",
            SiteStatus::Failed => "failed",
            SiteStatus::Deleting => "deleting",
            SiteStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for SiteStatus {
    fn default() -> Self {
        SiteStatus::Unknown
    }
}

// =============================================================================
// SSL Status
// =============================================================================

/// Lifecycle state of an SSL certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslStatus {
    None,
    Pending,
    Installing,
    Active,
    Expired,
    Failed,
    Unknown,
}

impl SslStatus {
    /// Parse a raw backend status string. Total: never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "none" | "not_installed" | "missing" | "uninstalled" => SslStatus::None,
            "pending" | "requested" | "ordering" | "awaiting" => SslStatus::Pending,
            "installing" | "issuing" | "processing" | "creating" => SslStatus::Installing,
            "active" | "installed" | "issued" | "valid" | "ok" => SslStatus::Active,
            "expired" => SslStatus::Expired,
            "failed" | "error" | "invalid" => SslStatus::Failed,
            _ => SslStatus::Unknown,
        }
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            SslStatus::None => "none",
            SslStatus::Pending => "pending",
            SslStatus::Installing => "installing",
            SslStatus::Active => "active",
            SslStatus::Expired => "expired",
            SslStatus::Failed => "failed",
            SslStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SslStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for SslStatus {
    fn default() -> Self {
        SslStatus::Unknown
    }
}

// =============================================================================
// Deployment Status
// =============================================================================

/// Lifecycle state of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Pending,
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    Unknown,
}

impl DeploymentStatus {
    /// Parse a raw backend status string. Total: never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "waiting" => DeploymentStatus::Pending,
            "queued" | "scheduled" => DeploymentStatus::Queued,
            "running" | "deploying" | "in_progress" | "building" => DeploymentStatus::Running,
            "succeeded" | "success" | "finished" | "done" | "deployed" | "complete"
            | "completed" => DeploymentStatus::Succeeded,
            "failed" | "error" | "failure" => DeploymentStatus::Failed,
            "cancelled" | "canceled" | "aborted" => DeploymentStatus::Cancelled,
            _ => DeploymentStatus::Unknown,
        }
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Pending => "pending",
            DeploymentStatus::Queued => "queued",
            DeploymentStatus::Running => "running",
            DeploymentStatus::Succeeded => "succeeded",
            DeploymentStatus::Failed => "failed",
            DeploymentStatus::Cancelled => "cancelled",
            DeploymentStatus::Unknown => "unknown",
        }
    }

    /// Whether the deployment has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::Succeeded | DeploymentStatus::Failed | DeploymentStatus::Cancelled
        )
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for DeploymentStatus {
    fn default() -> Self {
        DeploymentStatus::Unknown
    }
}

// =============================================================================
// Backup Status
// =============================================================================

/// Lifecycle state of a backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Restoring,
    Deleting,
    Unknown,
}

impl BackupStatus {
    /// Parse a raw backend status string. Total: never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "scheduled" | "queued" => BackupStatus::Pending,
            "in_progress" | "running" | "backing_up" | "creating" => BackupStatus::InProgress,
            "completed" | "success" | "finished" | "done" | "ok" => BackupStatus::Completed,
            "failed" | "error" => BackupStatus::Failed,
            "restoring" => BackupStatus::Restoring,
            "deleting" | "removing" => BackupStatus::Deleting,
            _ => BackupStatus::Unknown,
        }
    }

    /// Canonical snake_case form
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupStatus::Pending => "pending",
            BackupStatus::InProgress => "in_progress",
            BackupStatus::Completed => "completed",
            BackupStatus::Failed => "failed",
            BackupStatus::Restoring => "restoring",
            BackupStatus::Deleting => "deleting",
            BackupStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for BackupStatus {
    fn default() -> Self {
        BackupStatus::Unknown
    }
}

// =============================================================================
// Backup Type
// =============================================================================

/// Scope of a backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupType {
    Full,
    Database,
    Files,
    Incremental,
    Snapshot,
}

impl BackupType {
    /// Parse a raw backend type string. Total: unrecognized input maps to
    /// `Full` (the closed set carries no unknown member).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "database" | "db" | "mysql" | "sql" => BackupType::Database,
            "files" | "file" | "web" => BackupType::Files,
            "incremental" | "differential" => BackupType::Incremental,
            "snapshot" => BackupType::Snapshot,
            _ => BackupType::Full,
        }
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupType::Full => "full",
            BackupType::Database => "database",
            BackupType::Files => "files",
            BackupType::Incremental => "incremental",
            BackupType::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for BackupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for BackupType {
    fn default() -> Self {
        BackupType::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_status_synonyms() {
        assert_eq!(ServerStatus::parse("running"), ServerStatus::Active);
        assert_eq!(ServerStatus::parse("  ONLINE "), ServerStatus::Active);
        assert_eq!(ServerStatus::parse("building"), ServerStatus::Provisioning);
        assert_eq!(ServerStatus::parse("terminating"), ServerStatus::Deleting);
    }

    #[test]
    fn test_parsing_is_total() {
        for garbage in ["", "  ", "???", "running!", "Ünïcode", "42", "null"] {
            assert_eq!(ServerStatus::parse(garbage), ServerStatus::Unknown);
            assert_eq!(SiteStatus::parse(garbage), SiteStatus::Unknown);
            assert_eq!(SslStatus::parse(garbage), SslStatus::Unknown);
            assert_eq!(DeploymentStatus::parse(garbage), DeploymentStatus::Unknown);
            assert_eq!(BackupStatus::parse(garbage), BackupStatus::Unknown);
        }
    }

    #[test]
    fn test_canonical_round_trip() {
        for status in [
            ServerStatus::Provisioning,
            ServerStatus::Active,
            ServerStatus::Inactive,
            ServerStatus::Rebooting,
            ServerStatus::Failed,
            ServerStatus::Deleting,
            ServerStatus::Unknown,
        ] {
            assert_eq!(ServerStatus::parse(status.as_str()), status);
        }

        for status in [
            DeploymentStatus::Pending,
            DeploymentStatus::Queued,
            DeploymentStatus::Running,
            DeploymentStatus::Succeeded,
            DeploymentStatus::Failed,
            DeploymentStatus::Cancelled,
        ] {
            assert_eq!(DeploymentStatus::parse(status.as_str()), status);
        }

        for status in [
            BackupStatus::Pending,
            BackupStatus::InProgress,
            BackupStatus::Completed,
            BackupStatus::Failed,
            BackupStatus::Restoring,
            BackupStatus::Deleting,
        ] {
            assert_eq!(BackupStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_backup_type_defaults_to_full() {
        assert_eq!(BackupType::parse("db"), BackupType::Database);
        assert_eq!(BackupType::parse("weird"), BackupType::Full);
        assert_eq!(BackupType::parse(""), BackupType::Full);
    }

    #[test]
    fn test_deployment_terminal_states() {
        assert!(DeploymentStatus::Succeeded.is_terminal());
        assert!(DeploymentStatus::Cancelled.is_terminal());
        assert!(!DeploymentStatus::Running.is_terminal());
        assert!(!DeploymentStatus::Unknown.is_terminal());
    }
}
