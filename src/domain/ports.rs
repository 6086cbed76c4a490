//! Domain ports - core trait definitions for the hosting bridge
//!
//! `HostingProvider` is the boundary between application code and a concrete
//! panel binding. Every optional operation has a default body that reports
//! "not implemented"; a binding overrides exactly the operations its
//! capability set advertises. The capability guard is a pure function of
//! (provider, capability) and runs before any network call.

use crate::domain::capability::{Capability, CapabilitySet};
use crate::domain::entities::{
    Backup, ConnectionResult, Database, DatabaseUser, Deployment, Server, ServerMetrics, Site,
    SslCertificate, SystemUser,
};
use crate::domain::status::BackupType;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

// =============================================================================
// Request Configuration Types
// =============================================================================

/// Parameters for provisioning a new server
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub name: String,
    pub region: String,
    pub size: String,
    pub php_version: Option<String>,
    /// Upstream cloud to provision on, for panels that broker IaaS accounts
    pub cloud_provider: Option<String>,
}

impl ServerConfig {
    /// Validate before any network call
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if self.region.trim().is_empty() {
            errors.push("region is required".to_string());
        }
        if self.size.trim().is_empty() {
            errors.push("size is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_provisioning_config("server", errors))
        }
    }

    /// Request payload in the bridge's canonical key vocabulary
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "name": self.name,
            "region": self.region,
            "size": self.size,
        });
        if let Some(php) = &self.php_version {
            payload["php_version"] = json!(php);
        }
        if let Some(cloud) = &self.cloud_provider {
            payload["provider"] = json!(cloud);
        }
        payload
    }
}

/// Parameters for provisioning a new site
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    pub domain: String,
    pub php_version: Option<String>,
    pub aliases: Vec<String>,
    /// System user the site runs as, where the panel supports isolation
    pub system_user: Option<String>,
}

impl SiteConfig {
    /// Validate before any network call
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.domain.trim().is_empty() {
            errors.push("domain is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_provisioning_config("site", errors))
        }
    }

    /// Request payload in the bridge's canonical key vocabulary
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({ "domain": self.domain });
        if let Some(php) = &self.php_version {
            payload["php_version"] = json!(php);
        }
        if !self.aliases.is_empty() {
            payload["aliases"] = json!(self.aliases);
        }
        if let Some(user) = &self.system_user {
            payload["system_user"] = json!(user);
        }
        payload
    }
}

/// Parameters for creating a system user
#[derive(Debug, Clone, Default)]
pub struct SystemUserConfig {
    pub username: String,
    pub password: Option<String>,
    pub sudo: bool,
}

impl SystemUserConfig {
    /// Request payload in the bridge's canonical key vocabulary
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({ "username": self.username, "sudo": self.sudo });
        if let Some(password) = &self.password {
            payload["password"] = json!(password);
        }
        payload
    }
}

/// Parameters for creating a backup
#[derive(Debug, Clone, Default)]
pub struct BackupOptions {
    pub backup_type: BackupType,
    pub label: Option<String>,
}

impl BackupOptions {
    /// Request payload in the bridge's canonical key vocabulary
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({ "type": self.backup_type.as_str() });
        if let Some(label) = &self.label {
            payload["label"] = json!(label);
        }
        payload
    }
}

// =============================================================================
// Hosting Provider Port
// =============================================================================

/// Port for one concrete hosting-panel backend
#[async_trait]
pub trait HostingProvider: Send + Sync {
    // -- Identity ------------------------------------------------------------

    /// Driver name (registry key)
    fn name(&self) -> &str;

    /// Human-readable backend name
    fn display_name(&self) -> &str;

    /// Whether credentials and endpoint are present. Local check only.
    fn is_configured(&self) -> bool;

    /// Probe the backend; never errors, the outcome is the result value
    async fn test_connection(&self) -> ConnectionResult;

    /// The backend's advertised feature set
    fn capabilities(&self) -> &CapabilitySet;

    /// Whether the backend advertises a capability
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Fail-fast guard: reject an unsupported operation before any I/O.
    /// Consumes no rate-limit budget.
    fn ensure_supports(&self, capability: Capability) -> Result<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(Error::unsupported_capability(self.name(), capability))
        }
    }

    // -- Servers -------------------------------------------------------------

    async fn list_servers(&self) -> Result<Vec<Server>> {
        Err(Error::operation_not_implemented(self.name(), "list_servers"))
    }

    async fn get_server(&self, _id: &str) -> Result<Server> {
        Err(Error::operation_not_implemented(self.name(), "get_server"))
    }

    async fn create_server(&self, _config: &ServerConfig) -> Result<Server> {
        Err(Error::operation_not_implemented(self.name(), "create_server"))
    }

    async fn delete_server(&self, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(self.name(), "delete_server"))
    }

    async fn reboot_server(&self, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(self.name(), "reboot_server"))
    }

    async fn get_server_metrics(&self, _id: &str) -> Result<ServerMetrics> {
        Err(Error::operation_not_implemented(
            self.name(),
            "get_server_metrics",
        ))
    }

    async fn restart_service(&self, _server_id: &str, _service: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "restart_service",
        ))
    }

    /// Regions, sizes, and other catalog data for server provisioning
    async fn provider_metadata(&self, _cloud_provider: Option<&str>) -> Result<Value> {
        Err(Error::operation_not_implemented(
            self.name(),
            "provider_metadata",
        ))
    }

    // -- System users --------------------------------------------------------

    async fn list_system_users(&self, _server_id: &str) -> Result<Vec<SystemUser>> {
        Err(Error::operation_not_implemented(
            self.name(),
            "list_system_users",
        ))
    }

    async fn get_system_user(&self, _server_id: &str, _id: &str) -> Result<SystemUser> {
        Err(Error::operation_not_implemented(
            self.name(),
            "get_system_user",
        ))
    }

    async fn create_system_user(
        &self,
        _server_id: &str,
        _config: &SystemUserConfig,
    ) -> Result<SystemUser> {
        Err(Error::operation_not_implemented(
            self.name(),
            "create_system_user",
        ))
    }

    async fn delete_system_user(&self, _server_id: &str, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "delete_system_user",
        ))
    }

    // -- Sites ---------------------------------------------------------------

    async fn list_sites(&self, _server_id: Option<&str>) -> Result<Vec<Site>> {
        Err(Error::operation_not_implemented(self.name(), "list_sites"))
    }

    async fn get_site(&self, _id: &str) -> Result<Site> {
        Err(Error::operation_not_implemented(self.name(), "get_site"))
    }

    async fn create_site(&self, _server_id: &str, _config: &SiteConfig) -> Result<Site> {
        Err(Error::operation_not_implemented(self.name(), "create_site"))
    }

    async fn delete_site(&self, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(self.name(), "delete_site"))
    }

    async fn suspend_site(&self, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(self.name(), "suspend_site"))
    }

    async fn unsuspend_site(&self, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "unsuspend_site",
        ))
    }

    // -- PHP -----------------------------------------------------------------

    async fn available_php_versions(&self) -> Result<Vec<String>> {
        Err(Error::operation_not_implemented(
            self.name(),
            "available_php_versions",
        ))
    }

    async fn get_php_version(&self, _site_id: &str) -> Result<String> {
        Err(Error::operation_not_implemented(
            self.name(),
            "get_php_version",
        ))
    }

    async fn set_php_version(&self, _site_id: &str, _version: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "set_php_version",
        ))
    }

    // -- Databases -----------------------------------------------------------

    async fn list_databases(&self, _server_id: &str) -> Result<Vec<Database>> {
        Err(Error::operation_not_implemented(
            self.name(),
            "list_databases",
        ))
    }

    async fn create_database(&self, _server_id: &str, _name: &str) -> Result<Database> {
        Err(Error::operation_not_implemented(
            self.name(),
            "create_database",
        ))
    }

    async fn delete_database(&self, _server_id: &str, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "delete_database",
        ))
    }

    async fn list_database_users(&self, _server_id: &str) -> Result<Vec<DatabaseUser>> {
        Err(Error::operation_not_implemented(
            self.name(),
            "list_database_users",
        ))
    }

    async fn create_database_user(
        &self,
        _server_id: &str,
        _username: &str,
        _password: &str,
    ) -> Result<DatabaseUser> {
        Err(Error::operation_not_implemented(
            self.name(),
            "create_database_user",
        ))
    }

    async fn delete_database_user(&self, _server_id: &str, _id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "delete_database_user",
        ))
    }

    // -- SSL -----------------------------------------------------------------

    /// Advisory lookup: absence of a certificate is `Ok(None)`, not an error
    async fn get_ssl_certificate(&self, _site_id: &str) -> Result<Option<SslCertificate>> {
        Err(Error::operation_not_implemented(
            self.name(),
            "get_ssl_certificate",
        ))
    }

    async fn install_ssl_certificate(&self, _site_id: &str) -> Result<SslCertificate> {
        Err(Error::operation_not_implemented(
            self.name(),
            "install_ssl_certificate",
        ))
    }

    async fn install_custom_ssl(
        &self,
        _site_id: &str,
        _certificate: &str,
        _private_key: &str,
    ) -> Result<SslCertificate> {
        Err(Error::operation_not_implemented(
            self.name(),
            "install_custom_ssl",
        ))
    }

    async fn remove_ssl_certificate(&self, _site_id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "remove_ssl_certificate",
        ))
    }

    // -- Deployment ----------------------------------------------------------

    async fn deploy(&self, _site_id: &str) -> Result<Deployment> {
        Err(Error::operation_not_implemented(self.name(), "deploy"))
    }

    async fn get_deployment_status(
        &self,
        _site_id: &str,
        _deployment_id: &str,
    ) -> Result<Deployment> {
        Err(Error::operation_not_implemented(
            self.name(),
            "get_deployment_status",
        ))
    }

    async fn list_deployments(&self, _site_id: &str) -> Result<Vec<Deployment>> {
        Err(Error::operation_not_implemented(
            self.name(),
            "list_deployments",
        ))
    }

    async fn rollback(&self, _site_id: &str, _deployment_id: &str) -> Result<Deployment> {
        Err(Error::operation_not_implemented(self.name(), "rollback"))
    }

    // -- Backup --------------------------------------------------------------

    async fn list_backups(&self, _site_id: &str) -> Result<Vec<Backup>> {
        Err(Error::operation_not_implemented(self.name(), "list_backups"))
    }

    async fn create_backup(&self, _site_id: &str, _options: &BackupOptions) -> Result<Backup> {
        Err(Error::operation_not_implemented(
            self.name(),
            "create_backup",
        ))
    }

    async fn restore_backup(&self, _site_id: &str, _backup_id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "restore_backup",
        ))
    }

    async fn delete_backup(&self, _site_id: &str, _backup_id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(
            self.name(),
            "delete_backup",
        ))
    }

    // -- Cache ---------------------------------------------------------------

    async fn clear_cache(&self, _site_id: &str) -> Result<()> {
        Err(Error::operation_not_implemented(self.name(), "clear_cache"))
    }
}

/// Type alias for Arc'd providers
pub type ProviderRef = Arc<dyn HostingProvider>;
