//! Capability negotiation
//!
//! Each backend advertises the closed set of features it supports. Callers
//! query the set before attempting an operation; the fail-fast guard rejects
//! unsupported operations before any network call is made, so a capability
//! check never consumes rate-limit budget.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Capability
// =============================================================================

/// A named optional feature a hosting backend may support
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ServerManagement,
    ServerProvisioning,
    SiteProvisioning,
    SiteSuspension,
    StagingSites,
    SslInstall,
    SslAutoRenewal,
    BackupCreation,
    BackupRestoration,
    DatabaseManagement,
    PhpVersionSwitching,
    CacheClearing,
    GitDeployment,
    DeploymentScripts,
    QueueWorkers,
    ScheduledJobs,
    WordPressManagement,
    SshAccess,
    EmailManagement,
    DnsManagement,
    ResourceMonitoring,
    EnvironmentVariables,
    CustomServers,
    SystemUserManagement,
}

impl Capability {
    /// Canonical snake_case form
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ServerManagement => "server_management",
            Capability::ServerProvisioning => "server_provisioning",
            Capability::SiteProvisioning => "site_provisioning",
            Capability::SiteSuspension => "site_suspension",
            Capability::StagingSites => "staging_sites",
            Capability::SslInstall => "ssl_install",
            Capability::SslAutoRenewal => "ssl_auto_renewal",
            Capability::BackupCreation => "backup_creation",
            Capability::BackupRestoration => "backup_restoration",
            Capability::DatabaseManagement => "database_management",
            Capability::PhpVersionSwitching => "php_version_switching",
            Capability::CacheClearing => "cache_clearing",
            Capability::GitDeployment => "git_deployment",
            Capability::DeploymentScripts => "deployment_scripts",
            Capability::QueueWorkers => "queue_workers",
            Capability::ScheduledJobs => "scheduled_jobs",
            Capability::WordPressManagement => "wordpress_management",
            Capability::SshAccess => "ssh_access",
            Capability::EmailManagement => "email_management",
            Capability::DnsManagement => "dns_management",
            Capability::ResourceMonitoring => "resource_monitoring",
            Capability::EnvironmentVariables => "environment_variables",
            Capability::CustomServers => "custom_servers",
            Capability::SystemUserManagement => "system_user_management",
        }
    }

    /// All capabilities, in declaration order
    pub fn all() -> Vec<Capability> {
        vec![
            Capability::ServerManagement,
            Capability::ServerProvisioning,
            Capability::SiteProvisioning,
            Capability::SiteSuspension,
            Capability::StagingSites,
            Capability::SslInstall,
            Capability::SslAutoRenewal,
            Capability::BackupCreation,
            Capability::BackupRestoration,
            Capability::DatabaseManagement,
            Capability::PhpVersionSwitching,
            Capability::CacheClearing,
            Capability::GitDeployment,
            Capability::DeploymentScripts,
            Capability::QueueWorkers,
            Capability::ScheduledJobs,
            Capability::WordPressManagement,
            Capability::SshAccess,
            Capability::EmailManagement,
            Capability::DnsManagement,
            Capability::ResourceMonitoring,
            Capability::EnvironmentVariables,
            Capability::CustomServers,
            Capability::SystemUserManagement,
        ]
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A backend's advertised feature set
pub type CapabilitySet = BTreeSet<Capability>;

/// Build a capability set from a slice
pub fn capability_set(capabilities: &[Capability]) -> CapabilitySet {
    capabilities.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::SslAutoRenewal.to_string(), "ssl_auto_renewal");
        assert_eq!(Capability::GitDeployment.to_string(), "git_deployment");
    }

    #[test]
    fn test_all_capabilities_unique() {
        let all = Capability::all();
        let set: CapabilitySet = all.iter().copied().collect();
        assert_eq!(all.len(), set.len());
        assert_eq!(all.len(), 24);
    }

    #[test]
    fn test_capability_set_membership() {
        let set = capability_set(&[Capability::SslInstall, Capability::GitDeployment]);
        assert!(set.contains(&Capability::SslInstall));
        assert!(!set.contains(&Capability::DnsManagement));
    }
}
