//! Driver registry
//!
//! Resolves a driver name to a memoized provider instance. The registry owns
//! the shared pipeline collaborators (transport, rate limiter, response
//! cache) and hands them to driver factories along with the merged
//! configuration, so their lifecycle is scoped to the registry rather than
//! the process. Stock panels are registered up front; additional backends
//! can be registered at runtime.

use crate::config::ManagerConfig;
use crate::domain::ports::ProviderRef;
use crate::error::{Error, Result};
use crate::pipeline::{
    MemoryResponseCache, RateLimiterRef, ReqwestTransport, ResponseCacheRef, RollingWindowLimiter,
    TransportRef,
};
use crate::provider::rest::rest_provider;
use crate::provider::{builtin_profiles, DriverContext};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Constructor for one driver, invoked at most once per registered name
pub type DriverFactory = Arc<dyn Fn(DriverContext) -> Result<ProviderRef> + Send + Sync>;

// =============================================================================
// Hosting Manager
// =============================================================================

/// The driver registry
pub struct HostingManager {
    config: ManagerConfig,
    transport: TransportRef,
    limiter: RateLimiterRef,
    cache: ResponseCacheRef,
    factories: RwLock<BTreeMap<String, DriverFactory>>,
    instances: tokio::sync::RwLock<BTreeMap<String, ProviderRef>>,
}

impl HostingManager {
    /// Create a registry with production collaborators and the stock drivers
    /// registered
    pub fn new(config: ManagerConfig) -> Result<Arc<Self>> {
        let transport = Arc::new(ReqwestTransport::new(config.global.timeout())?);
        Ok(Self::with_collaborators(
            config,
            transport,
            Arc::new(RollingWindowLimiter::new()),
            Arc::new(MemoryResponseCache::new()),
        ))
    }

    /// Create a registry with injected collaborators (tests, custom stores)
    pub fn with_collaborators(
        config: ManagerConfig,
        transport: TransportRef,
        limiter: RateLimiterRef,
        cache: ResponseCacheRef,
    ) -> Arc<Self> {
        let manager = Arc::new(Self {
            config,
            transport,
            limiter,
            cache,
            factories: RwLock::new(BTreeMap::new()),
            instances: tokio::sync::RwLock::new(BTreeMap::new()),
        });
        manager.register_stock_drivers();
        manager
    }

    fn register_stock_drivers(&self) {
        for profile in builtin_profiles() {
            let name = profile.name.to_string();
            let factory: DriverFactory =
                Arc::new(move |context| Ok(rest_provider(profile.clone(), context)));
            self.factories.write().insert(name, factory);
        }
        info!(
            drivers = self.factories.read().len(),
            "stock drivers registered"
        );
    }

    /// Register (or replace) a driver factory at runtime
    pub fn register(&self, name: impl Into<String>, factory: DriverFactory) {
        let name = name.into();
        debug!(driver = %name, "driver registered");
        self.factories.write().insert(name, factory);
    }

    /// Registered driver names, sorted
    pub fn available_drivers(&self) -> Vec<String> {
        self.factories.read().keys().cloned().collect()
    }

    /// The configuration this registry was built with
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    fn context_for(&self, name: &str) -> DriverContext {
        DriverContext {
            name: name.to_string(),
            settings: self.config.driver_settings(name),
            global: self.config.global.clone(),
            transport: self.transport.clone(),
            limiter: self.limiter.clone(),
            cache: self.cache.clone(),
        }
    }

    fn factory_for(&self, name: &str) -> Option<DriverFactory> {
        let factories = self.factories.read();
        if let Some(factory) = factories.get(name) {
            return Some(factory.clone());
        }
        // A configured entry may point at a stock driver under its own name
        // (e.g. a second account): `drivers.<name>.driver = "forge"`
        self.config
            .driver_settings(name)
            .driver
            .as_deref()
            .and_then(|backing| factories.get(backing).cloned())
    }

    /// Resolve a driver name to its memoized provider instance
    pub async fn resolve(&self, name: &str) -> Result<ProviderRef> {
        if let Some(provider) = self.instances.read().await.get(name) {
            return Ok(provider.clone());
        }

        let mut instances = self.instances.write().await;
        // Raced constructions settle on the first instance
        if let Some(provider) = instances.get(name) {
            return Ok(provider.clone());
        }

        let factory = self
            .factory_for(name)
            .ok_or_else(|| Error::unknown_driver(name))?;
        let provider = factory(self.context_for(name))?;
        info!(driver = name, "provider resolved");
        instances.insert(name.to_string(), provider.clone());
        Ok(provider)
    }

    /// Whether a driver resolves and carries credentials. Resolution errors
    /// are swallowed into `false` so discovery across all drivers never
    /// raises.
    pub async fn is_configured(&self, name: &str) -> bool {
        match self.resolve(name).await {
            Ok(provider) => provider.is_configured(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverSettings;
    use crate::pipeline::tests::FakeTransport;
    use assert_matches::assert_matches;

    fn manager_with(config: ManagerConfig) -> Arc<HostingManager> {
        HostingManager::with_collaborators(
            config,
            FakeTransport::new(),
            Arc::new(RollingWindowLimiter::new()),
            Arc::new(MemoryResponseCache::new()),
        )
    }

    #[test]
    fn test_stock_drivers_available() {
        let manager = manager_with(ManagerConfig::default());
        let drivers = manager.available_drivers();
        assert_eq!(drivers.len(), 9);
        assert!(drivers.contains(&"forge".to_string()));
        assert!(drivers.contains(&"ploi".to_string()));
        // BTreeMap keys come out sorted
        let mut sorted = drivers.clone();
        sorted.sort();
        assert_eq!(drivers, sorted);
    }

    #[tokio::test]
    async fn test_resolution_is_memoized() {
        let manager = manager_with(ManagerConfig::default());

        let first = manager.resolve("forge").await.unwrap();
        let second = manager.resolve("forge").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_unknown_driver_is_an_error() {
        let manager = manager_with(ManagerConfig::default());

        let Err(err) = manager.resolve("cpanel").await else {
            panic!("expected resolve to fail for unknown driver");
        };
        assert_matches!(err, Error::UnknownDriver { ref driver } if driver == "cpanel");
    }

    #[tokio::test]
    async fn test_is_configured_without_credentials() {
        let manager = manager_with(ManagerConfig::default());

        // Resolves fine, reports unconfigured, never raises
        assert!(!manager.is_configured("forge").await);
        // Unknown drivers are swallowed into false
        assert!(!manager.is_configured("cpanel").await);
    }

    #[tokio::test]
    async fn test_is_configured_with_credentials() {
        let mut config = ManagerConfig::default();
        config.drivers.insert(
            "forge".into(),
            DriverSettings {
                api_token: Some("tok".into()),
                ..Default::default()
            },
        );
        let manager = manager_with(config);

        assert!(manager.is_configured("forge").await);
    }

    #[tokio::test]
    async fn test_configured_alias_resolves_backing_driver() {
        let mut config = ManagerConfig::default();
        config.drivers.insert(
            "forge-eu".into(),
            DriverSettings {
                driver: Some("forge".into()),
                api_token: Some("tok".into()),
                ..Default::default()
            },
        );
        let manager = manager_with(config);

        let provider = manager.resolve("forge-eu").await.unwrap();
        assert_eq!(provider.name(), "forge-eu");
        assert_eq!(provider.display_name(), "Laravel Forge");
        assert!(manager.is_configured("forge-eu").await);
    }

    #[tokio::test]
    async fn test_runtime_registration() {
        let manager = manager_with(ManagerConfig::default());
        assert!(manager.resolve("tenth-panel").await.is_err());

        let profile = crate::provider::DriverProfile::named("ploi").unwrap();
        let factory: DriverFactory =
            Arc::new(move |context| Ok(rest_provider(profile.clone(), context)));
        manager.register("tenth-panel", factory);

        let provider = manager.resolve("tenth-panel").await.unwrap();
        assert_eq!(provider.name(), "tenth-panel");
        assert!(manager
            .available_drivers()
            .contains(&"tenth-panel".to_string()));
    }
}
