//! REST provider binding
//!
//! Composes a [`DriverProfile`] with the request pipeline and the
//! normalization layer. Every gated operation runs the capability guard
//! before the pipeline, so unsupported operations are rejected without any
//! network call. Payloads are normalized through the entity `from_map`
//! builders; mutating calls invalidate the affected resource-class cache.
//!
//! The binding speaks the bridge's conventional REST dialect
//! (`servers`, `servers/{id}/sites`, `sites/{id}/deployments`, ...). A panel
//! whose dialect differs registers its own factory and overrides the
//! operations it needs; profile data (capabilities, ceilings, auth) is
//! reused either way.

use crate::domain::capability::{Capability, CapabilitySet};
use crate::domain::entities::{
    Backup, ConnectionResult, Database, DatabaseUser, Deployment, Server, ServerMetrics, Site,
    SslCertificate, SystemUser,
};
use crate::domain::ports::{
    BackupOptions, HostingProvider, ProviderRef, ServerConfig, SiteConfig, SystemUserConfig,
};
use crate::error::{Error, Result};
use crate::normalize::{extract_items, string_field, unwrap_item, JsonMap};
use crate::pipeline::{HttpMethod, PipelineConfig, RequestPipeline, ResourceClass};
use crate::provider::profile::DriverProfile;
use crate::provider::DriverContext;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Endpoint probed by `test_connection`
const PROBE_ENDPOINT: &str = "user";

fn enc(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn string_items(value: &Value, keys: &[&str]) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match keys.iter().find_map(|key| obj.get(*key)) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

// =============================================================================
// REST Provider
// =============================================================================

/// Profile-driven binding over the conventional REST dialect
pub struct RestProvider {
    name: String,
    profile: DriverProfile,
    configured: bool,
    pipeline: RequestPipeline,
}

impl RestProvider {
    /// Build a provider from its profile and the registry-merged context
    pub fn new(profile: DriverProfile, context: DriverContext) -> Arc<Self> {
        let base_url = context
            .settings
            .api_url
            .clone()
            .unwrap_or_else(|| profile.base_url.to_string());
        let requests_per_minute = context
            .settings
            .requests_per_minute
            .or(context.global.requests_per_minute)
            .unwrap_or(profile.requests_per_minute);

        let pipeline = RequestPipeline::new(
            context.name.clone(),
            base_url,
            profile.headers(&context.settings),
            context.transport,
            context.limiter,
            context.cache,
            PipelineConfig::from_global(&context.global, requests_per_minute),
        );

        info!(
            driver = %context.name,
            panel = profile.display_name,
            requests_per_minute,
            "provider initialized"
        );

        Arc::new(Self {
            name: context.name,
            configured: profile.is_configured(&context.settings),
            profile,
            pipeline,
        })
    }

    fn map_server_err(&self, err: Error, id: &str) -> Error {
        match err {
            Error::Api { status: 404, .. } => Error::server_not_found(self.name(), id),
            other => other,
        }
    }

    fn map_site_err(&self, err: Error, id: &str) -> Error {
        match err {
            Error::Api { status: 404, .. } => Error::site_not_found(self.name(), id),
            other => other,
        }
    }

    fn servers_from(&self, value: &Value) -> Vec<Server> {
        extract_items(value, &["servers"])
            .into_iter()
            .map(Server::from_map)
            .collect()
    }

    fn sites_from(&self, value: &Value, server_id: Option<&str>) -> Vec<Site> {
        extract_items(value, &["sites"])
            .into_iter()
            .map(|item| {
                let mut site = Site::from_map(item);
                if site.server_id.is_empty() {
                    if let Some(id) = server_id {
                        site.server_id = id.to_string();
                    }
                }
                site
            })
            .collect()
    }

    async fn sites_for_server(&self, server_id: &str) -> Result<Vec<Site>> {
        let value = self
            .pipeline
            .execute_cached(
                ResourceClass::Sites,
                &format!("server:{}", server_id),
                &format!("servers/{}/sites", enc(server_id)),
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        Ok(self.sites_from(&value, Some(server_id)))
    }

    fn certificate_from(&self, value: &Value, site_id: &str) -> Option<SslCertificate> {
        let item = unwrap_item(value, &["certificate", "ssl"])?;
        if item.is_empty() {
            return None;
        }
        let mut certificate = SslCertificate::from_map(item);
        if certificate.site_id.is_empty() {
            certificate.site_id = site_id.to_string();
        }
        Some(certificate)
    }

    fn deployment_from(&self, item: &JsonMap, site_id: &str) -> Deployment {
        let mut deployment = Deployment::from_map(item);
        if deployment.site_id.is_empty() {
            deployment.site_id = site_id.to_string();
        }
        deployment
    }

    fn backup_from(&self, item: &JsonMap, site_id: &str) -> Backup {
        let mut backup = Backup::from_map(item);
        if backup.site_id.is_empty() {
            backup.site_id = site_id.to_string();
        }
        backup
    }
}

#[async_trait]
impl HostingProvider for RestProvider {
    // -- Identity ------------------------------------------------------------

    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        self.profile.display_name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn test_connection(&self) -> ConnectionResult {
        self.pipeline.probe(PROBE_ENDPOINT).await
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.profile.capabilities
    }

    // -- Servers -------------------------------------------------------------

    async fn list_servers(&self) -> Result<Vec<Server>> {
        self.ensure_supports(Capability::ServerManagement)?;
        let value = self
            .pipeline
            .execute_cached(ResourceClass::Servers, "all", "servers")
            .await?;
        Ok(self.servers_from(&value))
    }

    async fn get_server(&self, id: &str) -> Result<Server> {
        self.ensure_supports(Capability::ServerManagement)?;
        let value = self
            .pipeline
            .execute_cached(ResourceClass::Servers, id, &format!("servers/{}", enc(id)))
            .await
            .map_err(|err| self.map_server_err(err, id))?;
        let item = unwrap_item(&value, &["server"]).cloned().unwrap_or_default();
        Ok(Server::from_map(&item))
    }

    async fn create_server(&self, config: &ServerConfig) -> Result<Server> {
        self.ensure_supports(Capability::ServerProvisioning)?;
        config.validate()?;

        let value = self
            .pipeline
            .execute(HttpMethod::Post, "servers", Some(config.to_payload()))
            .await
            .map_err(|err| match err {
                Error::Api { message, .. } => {
                    Error::provisioning_failed("server", &config.name, message)
                }
                other => other,
            })?;
        self.pipeline.invalidate_class(ResourceClass::Servers).await;

        let item = unwrap_item(&value, &["server"]).cloned().unwrap_or_default();
        Ok(Server::from_map(&item))
    }

    async fn delete_server(&self, id: &str) -> Result<()> {
        self.ensure_supports(Capability::ServerProvisioning)?;
        self.pipeline
            .execute(HttpMethod::Delete, &format!("servers/{}", enc(id)), None)
            .await
            .map_err(|err| self.map_server_err(err, id))?;
        self.pipeline.invalidate_class(ResourceClass::Servers).await;
        Ok(())
    }

    async fn reboot_server(&self, id: &str) -> Result<()> {
        self.ensure_supports(Capability::ServerManagement)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!("servers/{}/reboot", enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, id))?;
        self.pipeline.invalidate(ResourceClass::Servers, id).await;
        Ok(())
    }

    async fn get_server_metrics(&self, id: &str) -> Result<ServerMetrics> {
        self.ensure_supports(Capability::ResourceMonitoring)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Get,
                &format!("servers/{}/metrics", enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, id))?;
        let item = unwrap_item(&value, &["metrics", "stats"])
            .cloned()
            .unwrap_or_default();
        Ok(ServerMetrics::from_map(&item))
    }

    async fn restart_service(&self, server_id: &str, service: &str) -> Result<()> {
        self.ensure_supports(Capability::ServerManagement)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!(
                    "servers/{}/services/{}/restart",
                    enc(server_id),
                    enc(service)
                ),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        Ok(())
    }

    async fn provider_metadata(&self, cloud_provider: Option<&str>) -> Result<Value> {
        self.ensure_supports(Capability::ServerProvisioning)?;
        let endpoint = match cloud_provider {
            Some(cloud) => format!("providers/{}", enc(cloud)),
            None => "providers".to_string(),
        };
        self.pipeline.execute(HttpMethod::Get, &endpoint, None).await
    }

    // -- System users --------------------------------------------------------

    async fn list_system_users(&self, server_id: &str) -> Result<Vec<SystemUser>> {
        self.ensure_supports(Capability::SystemUserManagement)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Get,
                &format!("servers/{}/users", enc(server_id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        Ok(extract_items(&value, &["users", "system_users"])
            .into_iter()
            .map(|item| {
                let mut user = SystemUser::from_map(item);
                if user.server_id.is_empty() {
                    user.server_id = server_id.to_string();
                }
                user
            })
            .collect())
    }

    async fn get_system_user(&self, server_id: &str, id: &str) -> Result<SystemUser> {
        self.ensure_supports(Capability::SystemUserManagement)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Get,
                &format!("servers/{}/users/{}", enc(server_id), enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        let item = unwrap_item(&value, &["user"]).cloned().unwrap_or_default();
        let mut user = SystemUser::from_map(&item);
        if user.server_id.is_empty() {
            user.server_id = server_id.to_string();
        }
        Ok(user)
    }

    async fn create_system_user(
        &self,
        server_id: &str,
        config: &SystemUserConfig,
    ) -> Result<SystemUser> {
        self.ensure_supports(Capability::SystemUserManagement)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("servers/{}/users", enc(server_id)),
                Some(config.to_payload()),
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        let item = unwrap_item(&value, &["user"]).cloned().unwrap_or_default();
        let mut user = SystemUser::from_map(&item);
        if user.server_id.is_empty() {
            user.server_id = server_id.to_string();
        }
        Ok(user)
    }

    async fn delete_system_user(&self, server_id: &str, id: &str) -> Result<()> {
        self.ensure_supports(Capability::SystemUserManagement)?;
        self.pipeline
            .execute(
                HttpMethod::Delete,
                &format!("servers/{}/users/{}", enc(server_id), enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        Ok(())
    }

    // -- Sites ---------------------------------------------------------------

    async fn list_sites(&self, server_id: Option<&str>) -> Result<Vec<Site>> {
        self.ensure_supports(Capability::SiteProvisioning)?;

        match server_id {
            Some(id) => self.sites_for_server(id).await,
            None => {
                // One call per server, issued sequentially; the first failing
                // server aborts the aggregate
                let servers = self.list_servers().await?;
                let mut sites = Vec::new();
                for server in &servers {
                    sites.extend(self.sites_for_server(&server.id).await?);
                }
                Ok(sites)
            }
        }
    }

    async fn get_site(&self, id: &str) -> Result<Site> {
        self.ensure_supports(Capability::SiteProvisioning)?;
        let value = self
            .pipeline
            .execute_cached(ResourceClass::Sites, id, &format!("sites/{}", enc(id)))
            .await
            .map_err(|err| self.map_site_err(err, id))?;
        let item = unwrap_item(&value, &["site"]).cloned().unwrap_or_default();
        Ok(Site::from_map(&item))
    }

    async fn create_site(&self, server_id: &str, config: &SiteConfig) -> Result<Site> {
        self.ensure_supports(Capability::SiteProvisioning)?;
        config.validate()?;

        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("servers/{}/sites", enc(server_id)),
                Some(config.to_payload()),
            )
            .await
            .map_err(|err| match err {
                Error::Api { message, .. } => {
                    Error::provisioning_failed("site", &config.domain, message)
                }
                other => other,
            })?;
        self.pipeline.invalidate_class(ResourceClass::Sites).await;

        let item = unwrap_item(&value, &["site"]).cloned().unwrap_or_default();
        let mut site = Site::from_map(&item);
        if site.server_id.is_empty() {
            site.server_id = server_id.to_string();
        }
        Ok(site)
    }

    async fn delete_site(&self, id: &str) -> Result<()> {
        self.ensure_supports(Capability::SiteProvisioning)?;
        self.pipeline
            .execute(HttpMethod::Delete, &format!("sites/{}", enc(id)), None)
            .await
            .map_err(|err| self.map_site_err(err, id))?;
        self.pipeline.invalidate_class(ResourceClass::Sites).await;
        Ok(())
    }

    async fn suspend_site(&self, id: &str) -> Result<()> {
        self.ensure_supports(Capability::SiteSuspension)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/suspend", enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, id))?;
        self.pipeline.invalidate_class(ResourceClass::Sites).await;
        Ok(())
    }

    async fn unsuspend_site(&self, id: &str) -> Result<()> {
        self.ensure_supports(Capability::SiteSuspension)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/unsuspend", enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, id))?;
        self.pipeline.invalidate_class(ResourceClass::Sites).await;
        Ok(())
    }

    // -- PHP -----------------------------------------------------------------

    async fn available_php_versions(&self) -> Result<Vec<String>> {
        self.ensure_supports(Capability::PhpVersionSwitching)?;
        let value = self
            .pipeline
            .execute(HttpMethod::Get, "php/versions", None)
            .await?;
        Ok(string_items(&value, &["versions", "php_versions"]))
    }

    async fn get_php_version(&self, site_id: &str) -> Result<String> {
        self.ensure_supports(Capability::PhpVersionSwitching)?;
        let value = self
            .pipeline
            .execute(HttpMethod::Get, &format!("sites/{}/php", enc(site_id)), None)
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        let item = unwrap_item(&value, &["php"]).cloned().unwrap_or_default();
        Ok(string_field(&item, &["version", "php_version"]))
    }

    async fn set_php_version(&self, site_id: &str, version: &str) -> Result<()> {
        self.ensure_supports(Capability::PhpVersionSwitching)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/php", enc(site_id)),
                Some(json!({ "version": version })),
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        self.pipeline.invalidate_class(ResourceClass::Sites).await;
        Ok(())
    }

    // -- Databases -----------------------------------------------------------

    async fn list_databases(&self, server_id: &str) -> Result<Vec<Database>> {
        self.ensure_supports(Capability::DatabaseManagement)?;
        let value = self
            .pipeline
            .execute_cached(
                ResourceClass::Databases,
                &format!("server:{}", server_id),
                &format!("servers/{}/databases", enc(server_id)),
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        Ok(extract_items(&value, &["databases"])
            .into_iter()
            .map(|item| {
                let mut database = Database::from_map(item);
                if database.server_id.is_empty() {
                    database.server_id = server_id.to_string();
                }
                database
            })
            .collect())
    }

    async fn create_database(&self, server_id: &str, name: &str) -> Result<Database> {
        self.ensure_supports(Capability::DatabaseManagement)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("servers/{}/databases", enc(server_id)),
                Some(json!({ "name": name })),
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        self.pipeline
            .invalidate_class(ResourceClass::Databases)
            .await;

        let item = unwrap_item(&value, &["database"])
            .cloned()
            .unwrap_or_default();
        let mut database = Database::from_map(&item);
        if database.server_id.is_empty() {
            database.server_id = server_id.to_string();
        }
        Ok(database)
    }

    async fn delete_database(&self, server_id: &str, id: &str) -> Result<()> {
        self.ensure_supports(Capability::DatabaseManagement)?;
        self.pipeline
            .execute(
                HttpMethod::Delete,
                &format!("servers/{}/databases/{}", enc(server_id), enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        self.pipeline
            .invalidate_class(ResourceClass::Databases)
            .await;
        Ok(())
    }

    async fn list_database_users(&self, server_id: &str) -> Result<Vec<DatabaseUser>> {
        self.ensure_supports(Capability::DatabaseManagement)?;
        let value = self
            .pipeline
            .execute_cached(
                ResourceClass::Databases,
                &format!("server:{}:users", server_id),
                &format!("servers/{}/database-users", enc(server_id)),
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        Ok(extract_items(&value, &["users", "database_users"])
            .into_iter()
            .map(|item| {
                let mut user = DatabaseUser::from_map(item);
                if user.server_id.is_empty() {
                    user.server_id = server_id.to_string();
                }
                user
            })
            .collect())
    }

    async fn create_database_user(
        &self,
        server_id: &str,
        username: &str,
        password: &str,
    ) -> Result<DatabaseUser> {
        self.ensure_supports(Capability::DatabaseManagement)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("servers/{}/database-users", enc(server_id)),
                Some(json!({ "username": username, "password": password })),
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        self.pipeline
            .invalidate_class(ResourceClass::Databases)
            .await;

        let item = unwrap_item(&value, &["user"]).cloned().unwrap_or_default();
        let mut user = DatabaseUser::from_map(&item);
        if user.server_id.is_empty() {
            user.server_id = server_id.to_string();
        }
        Ok(user)
    }

    async fn delete_database_user(&self, server_id: &str, id: &str) -> Result<()> {
        self.ensure_supports(Capability::DatabaseManagement)?;
        self.pipeline
            .execute(
                HttpMethod::Delete,
                &format!("servers/{}/database-users/{}", enc(server_id), enc(id)),
                None,
            )
            .await
            .map_err(|err| self.map_server_err(err, server_id))?;
        self.pipeline
            .invalidate_class(ResourceClass::Databases)
            .await;
        Ok(())
    }

    // -- SSL -----------------------------------------------------------------

    async fn get_ssl_certificate(&self, site_id: &str) -> Result<Option<SslCertificate>> {
        self.ensure_supports(Capability::SslInstall)?;
        let value = match self
            .pipeline
            .execute_cached(
                ResourceClass::Ssl,
                site_id,
                &format!("sites/{}/certificate", enc(site_id)),
            )
            .await
        {
            Ok(value) => value,
            // Advisory lookup: no certificate is a normal answer
            Err(Error::Api { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };
        Ok(self.certificate_from(&value, site_id))
    }

    async fn install_ssl_certificate(&self, site_id: &str) -> Result<SslCertificate> {
        self.ensure_supports(Capability::SslInstall)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/certificates/letsencrypt", enc(site_id)),
                None,
            )
            .await
            .map_err(|err| match err {
                Error::Api { message, .. } => Error::ssl_install_failed(site_id, message),
                other => other,
            })?;
        self.pipeline.invalidate(ResourceClass::Ssl, site_id).await;

        Ok(self
            .certificate_from(&value, site_id)
            .unwrap_or_else(|| SslCertificate {
                site_id: site_id.to_string(),
                ..Default::default()
            }))
    }

    async fn install_custom_ssl(
        &self,
        site_id: &str,
        certificate: &str,
        private_key: &str,
    ) -> Result<SslCertificate> {
        self.ensure_supports(Capability::SslInstall)?;
        if certificate.trim().is_empty() || private_key.trim().is_empty() {
            return Err(Error::invalid_certificate(
                "certificate and private key are required",
            ));
        }

        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/certificates", enc(site_id)),
                Some(json!({ "certificate": certificate, "private_key": private_key })),
            )
            .await
            .map_err(|err| match err {
                Error::Api { message, .. } => Error::ssl_install_failed(site_id, message),
                other => other,
            })?;
        self.pipeline.invalidate(ResourceClass::Ssl, site_id).await;

        Ok(self
            .certificate_from(&value, site_id)
            .unwrap_or_else(|| SslCertificate {
                site_id: site_id.to_string(),
                ..Default::default()
            }))
    }

    async fn remove_ssl_certificate(&self, site_id: &str) -> Result<()> {
        self.ensure_supports(Capability::SslInstall)?;
        self.pipeline
            .execute(
                HttpMethod::Delete,
                &format!("sites/{}/certificate", enc(site_id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        self.pipeline.invalidate(ResourceClass::Ssl, site_id).await;
        Ok(())
    }

    // -- Deployment ----------------------------------------------------------

    async fn deploy(&self, site_id: &str) -> Result<Deployment> {
        self.ensure_supports(Capability::GitDeployment)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/deploy", enc(site_id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        self.pipeline
            .invalidate(ResourceClass::Deployments, &format!("site:{}", site_id))
            .await;

        let item = unwrap_item(&value, &["deployment"])
            .cloned()
            .unwrap_or_default();
        Ok(self.deployment_from(&item, site_id))
    }

    async fn get_deployment_status(
        &self,
        site_id: &str,
        deployment_id: &str,
    ) -> Result<Deployment> {
        self.ensure_supports(Capability::GitDeployment)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Get,
                &format!(
                    "sites/{}/deployments/{}",
                    enc(site_id),
                    enc(deployment_id)
                ),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        let item = unwrap_item(&value, &["deployment"])
            .cloned()
            .unwrap_or_default();
        Ok(self.deployment_from(&item, site_id))
    }

    async fn list_deployments(&self, site_id: &str) -> Result<Vec<Deployment>> {
        self.ensure_supports(Capability::GitDeployment)?;
        let value = self
            .pipeline
            .execute_cached(
                ResourceClass::Deployments,
                &format!("site:{}", site_id),
                &format!("sites/{}/deployments", enc(site_id)),
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        Ok(extract_items(&value, &["deployments"])
            .into_iter()
            .map(|item| self.deployment_from(item, site_id))
            .collect())
    }

    async fn rollback(&self, site_id: &str, deployment_id: &str) -> Result<Deployment> {
        self.ensure_supports(Capability::GitDeployment)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!(
                    "sites/{}/deployments/{}/rollback",
                    enc(site_id),
                    enc(deployment_id)
                ),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        self.pipeline
            .invalidate(ResourceClass::Deployments, &format!("site:{}", site_id))
            .await;

        let item = unwrap_item(&value, &["deployment"])
            .cloned()
            .unwrap_or_default();
        Ok(self.deployment_from(&item, site_id))
    }

    // -- Backup --------------------------------------------------------------

    async fn list_backups(&self, site_id: &str) -> Result<Vec<Backup>> {
        self.ensure_supports(Capability::BackupCreation)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Get,
                &format!("sites/{}/backups", enc(site_id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        Ok(extract_items(&value, &["backups"])
            .into_iter()
            .map(|item| self.backup_from(item, site_id))
            .collect())
    }

    async fn create_backup(&self, site_id: &str, options: &BackupOptions) -> Result<Backup> {
        self.ensure_supports(Capability::BackupCreation)?;
        let value = self
            .pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/backups", enc(site_id)),
                Some(options.to_payload()),
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        let item = unwrap_item(&value, &["backup"]).cloned().unwrap_or_default();
        Ok(self.backup_from(&item, site_id))
    }

    async fn restore_backup(&self, site_id: &str, backup_id: &str) -> Result<()> {
        self.ensure_supports(Capability::BackupRestoration)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/backups/{}/restore", enc(site_id), enc(backup_id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        Ok(())
    }

    async fn delete_backup(&self, site_id: &str, backup_id: &str) -> Result<()> {
        self.ensure_supports(Capability::BackupCreation)?;
        self.pipeline
            .execute(
                HttpMethod::Delete,
                &format!("sites/{}/backups/{}", enc(site_id), enc(backup_id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        Ok(())
    }

    // -- Cache ---------------------------------------------------------------

    async fn clear_cache(&self, site_id: &str) -> Result<()> {
        self.ensure_supports(Capability::CacheClearing)?;
        self.pipeline
            .execute(
                HttpMethod::Post,
                &format!("sites/{}/cache/clear", enc(site_id)),
                None,
            )
            .await
            .map_err(|err| self.map_site_err(err, site_id))?;
        Ok(())
    }
}

/// Build the provider behind a `ProviderRef`
pub fn rest_provider(profile: DriverProfile, context: DriverContext) -> ProviderRef {
    RestProvider::new(profile, context)
}
