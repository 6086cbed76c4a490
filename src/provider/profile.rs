//! Stock driver profiles
//!
//! A profile describes one hosting panel as data: display name, default API
//! root, auth scheme, rate ceiling, and the capability set it advertises.
//! Profiles drive capability negotiation and configuration checks; they do
//! not encode any panel's endpoint dialect.

use crate::config::DriverSettings;
use crate::domain::capability::{capability_set, Capability, CapabilitySet};

// =============================================================================
// Auth Scheme
// =============================================================================

/// How a panel authenticates API calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <api_token>`
    BearerToken,
    /// Token in a custom header
    TokenHeader(&'static str),
    /// Key/secret pair in two headers
    KeyPairHeaders {
        key_header: &'static str,
        secret_header: &'static str,
    },
}

// =============================================================================
// Driver Profile
// =============================================================================

/// Static description of one hosting panel
#[derive(Debug, Clone)]
pub struct DriverProfile {
    pub name: &'static str,
    pub display_name: &'static str,
    pub base_url: &'static str,
    pub auth: AuthScheme,
    /// Default requests-per-minute ceiling for this panel
    pub requests_per_minute: u32,
    pub capabilities: CapabilitySet,
}

impl DriverProfile {
    /// Whether the settings carry the credentials this panel's auth scheme
    /// needs. Presence only; contents are never inspected.
    pub fn is_configured(&self, settings: &DriverSettings) -> bool {
        match self.auth {
            AuthScheme::BearerToken | AuthScheme::TokenHeader(_) => settings.has_token(),
            AuthScheme::KeyPairHeaders { .. } => settings.has_key_pair(),
        }
    }

    /// Request headers for this panel's auth scheme
    pub fn headers(&self, settings: &DriverSettings) -> Vec<(String, String)> {
        match self.auth {
            AuthScheme::BearerToken => settings
                .api_token
                .iter()
                .map(|token| ("Authorization".to_string(), format!("Bearer {}", token)))
                .collect(),
            AuthScheme::TokenHeader(header) => settings
                .api_token
                .iter()
                .map(|token| (header.to_string(), token.clone()))
                .collect(),
            AuthScheme::KeyPairHeaders {
                key_header,
                secret_header,
            } => {
                let mut headers = Vec::new();
                if let Some(key) = &settings.api_key {
                    headers.push((key_header.to_string(), key.clone()));
                }
                if let Some(secret) = &settings.api_secret {
                    headers.push((secret_header.to_string(), secret.clone()));
                }
                headers
            }
        }
    }

    /// Look up a stock profile by driver name
    pub fn named(name: &str) -> Option<DriverProfile> {
        builtin_profiles()
            .into_iter()
            .find(|profile| profile.name == name)
    }
}

/// The stock panels the bridge ships profiles for
pub fn builtin_profiles() -> Vec<DriverProfile> {
    vec![
        DriverProfile {
            name: "forge",
            display_name: "Laravel Forge",
            base_url: "https://forge.laravel.com/api/v1",
            auth: AuthScheme::BearerToken,
            requests_per_minute: 60,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::ServerProvisioning,
                Capability::SiteProvisioning,
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
                Capability::SshAccess,
                Capability::ResourceMonitoring,
                Capability::EnvironmentVariables,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "ploi",
            display_name: "Ploi",
            base_url: "https://ploi.io/api",
            auth: AuthScheme::BearerToken,
            requests_per_minute: 30,
            capabilities: capability_set(&[
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
                Capability::DnsManagement,
                Capability::ResourceMonitoring,
                Capability::EnvironmentVariables,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "runcloud",
            display_name: "RunCloud",
            base_url: "https://manage.runcloud.io/api/v2",
            auth: AuthScheme::KeyPairHeaders {
                key_header: "X-Api-Key",
                secret_header: "X-Api-Secret",
            },
            requests_per_minute: 20,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::SiteProvisioning,
                Capability::StagingSites,
                Capability::SslInstall,
                Capability::SslAutoRenewal,
                Capability::DatabaseManagement,
                Capability::PhpVersionSwitching,
                Capability::GitDeployment,
                Capability::DeploymentScripts,
                Capability::ScheduledJobs,
                Capability::SshAccess,
                Capability::ResourceMonitoring,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "gridpane",
            display_name: "GridPane",
            base_url: "https://my.gridpane.com/oauth/api/v1",
            auth: AuthScheme::BearerToken,
            requests_per_minute: 10,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::SiteProvisioning,
                Capability::SiteSuspension,
                Capability::StagingSites,
                Capability::SslInstall,
                Capability::SslAutoRenewal,
                Capability::BackupCreation,
                Capability::BackupRestoration,
                Capability::PhpVersionSwitching,
                Capability::CacheClearing,
                Capability::WordPressManagement,
                Capability::DnsManagement,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "spinupwp",
            display_name: "SpinupWP",
            base_url: "https://api.spinupwp.app/v1",
            auth: AuthScheme::BearerToken,
            requests_per_minute: 60,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::SiteProvisioning,
                Capability::SslInstall,
                Capability::SslAutoRenewal,
                Capability::BackupCreation,
                Capability::BackupRestoration,
                Capability::DatabaseManagement,
                Capability::PhpVersionSwitching,
                Capability::CacheClearing,
                Capability::WordPressManagement,
                Capability::ScheduledJobs,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "serverpilot",
            display_name: "ServerPilot",
            base_url: "https://api.serverpilot.io/v1",
            auth: AuthScheme::KeyPairHeaders {
                key_header: "X-Client-Id",
                secret_header: "X-Api-Key",
            },
            requests_per_minute: 30,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::SiteProvisioning,
                Capability::SslInstall,
                Capability::SslAutoRenewal,
                Capability::DatabaseManagement,
                Capability::PhpVersionSwitching,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "cloudways",
            display_name: "Cloudways",
            base_url: "https://api.cloudways.com/api/v1",
            auth: AuthScheme::BearerToken,
            requests_per_minute: 20,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::ServerProvisioning,
                Capability::SiteProvisioning,
                Capability::StagingSites,
                Capability::SslInstall,
                Capability::BackupCreation,
                Capability::BackupRestoration,
                Capability::DatabaseManagement,
                Capability::PhpVersionSwitching,
                Capability::CacheClearing,
                Capability::GitDeployment,
                Capability::WordPressManagement,
                Capability::SshAccess,
                Capability::EmailManagement,
                Capability::DnsManagement,
                Capability::ResourceMonitoring,
                Capability::EnvironmentVariables,
                Capability::ScheduledJobs,
            ]),
        },
        DriverProfile {
            name: "serveravatar",
            display_name: "ServerAvatar",
            base_url: "https://api.serveravatar.com",
            auth: AuthScheme::BearerToken,
            requests_per_minute: 30,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::ServerProvisioning,
                Capability::SiteProvisioning,
                Capability::SiteSuspension,
                Capability::SslInstall,
                Capability::BackupCreation,
                Capability::DatabaseManagement,
                Capability::PhpVersionSwitching,
                Capability::GitDeployment,
                Capability::ScheduledJobs,
                Capability::SshAccess,
                Capability::ResourceMonitoring,
                Capability::SystemUserManagement,
            ]),
        },
        DriverProfile {
            name: "moss",
            display_name: "Moss",
            base_url: "https://api.moss.sh/api/v1",
            auth: AuthScheme::TokenHeader("X-Api-Token"),
            requests_per_minute: 15,
            capabilities: capability_set(&[
                Capability::ServerManagement,
                Capability::SiteProvisioning,
                Capability::SslInstall,
                Capability::SslAutoRenewal,
                Capability::DatabaseManagement,
                Capability::PhpVersionSwitching,
                Capability::GitDeployment,
                Capability::DeploymentScripts,
                Capability::ScheduledJobs,
                Capability::SshAccess,
                Capability::CustomServers,
                Capability::SystemUserManagement,
            ]),
        },
    ]
}
