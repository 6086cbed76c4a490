//! Hostbridge - Unified Hosting Control Panel Bridge
//!
//! A unified client for heterogeneous hosting-control-panel backends. One set
//! of operations (list servers, create a site, install SSL, trigger a
//! deployment, ...) works against any supported panel; each backend's REST
//! dialect, field names, and status vocabulary are normalized away.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Driver Registry (Manager)                        │
//! │        name → factory, memoized singletons, merged configuration         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                            Provider Binding                              │
//! │  ┌──────────────────────┐   ┌──────────────────────────────────────┐    │
//! │  │  Capability Guard    │   │  Driver Profiles (forge, ploi, ...)  │    │
//! │  │  (fail-fast, no I/O) │   │  capability sets · ceilings · auth   │    │
//! │  └──────────┬───────────┘   └──────────────────────────────────────┘    │
//! ├─────────────┼───────────────────────────────────────────────────────────┤
//! │             │              Request Pipeline                              │
//! │   rate window → cache lookup → transport (+retry) → classification       │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                         Canonical Normalizer                             │
//! │     fallback keys · total status parsing · polymorphic dates             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                          Canonical Entities                              │
//! │   Server · Site · Database · SslCertificate · Deployment · Backup       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: driver registry and provider resolution
//! - [`provider`]: profile-driven provider bindings
//! - [`pipeline`]: rate limiting, caching, transport, status classification
//! - [`normalize`]: payload-to-entity normalization
//! - [`domain`]: canonical entities, statuses, capabilities, the provider port
//! - [`config`]: configuration consumed by the registry
//! - [`error`]: error taxonomy
//!
//! # Usage
//!
//! ```ignore
//! use hostbridge::{HostingManager, ManagerConfig};
//!
//! let config: ManagerConfig = serde_json::from_str(raw_config)?;
//! let manager = HostingManager::new(config)?;
//!
//! let forge = manager.resolve("forge").await?;
//! if forge.supports(hostbridge::Capability::GitDeployment) {
//!     let deployment = forge.deploy("site-42").await?;
//!     println!("deploying {}", deployment.id);
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod registry;

// Re-export commonly used types
pub use config::{CacheTtlConfig, DriverSettings, GlobalConfig, ManagerConfig};

pub use domain::{
    Backup, BackupOptions, BackupStatus, BackupType, Capability, CapabilitySet, ConnectionResult,
    Database, DatabaseUser, Deployment, DeploymentStatus, HostingProvider, LoadAverage,
    MetricThresholds, ProviderRef, Server, ServerConfig, ServerMetrics, ServerStatus, Site,
    SiteConfig, SiteStatus, SslCertificate, SslStatus, SystemUser, SystemUserConfig,
};

pub use error::{Error, Result};

pub use pipeline::{
    HttpMethod, HttpTransport, MemoryResponseCache, RateLimiter, RequestPipeline, ResourceClass,
    ResponseCache, RollingWindowLimiter,
};

pub use provider::{builtin_profiles, AuthScheme, DriverContext, DriverProfile, RestProvider};

pub use registry::{DriverFactory, HostingManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
