//! Core domain types and traits
//!
//! - [`entities`]: immutable canonical value objects
//! - [`status`]: closed status enumerations with total parsing
//! - [`capability`]: the closed capability set backends negotiate over
//! - [`ports`]: the `HostingProvider` boundary trait

pub mod capability;
pub mod entities;
pub mod ports;
pub mod status;

pub use capability::{capability_set, Capability, CapabilitySet};
pub use entities::{
    Backup, ConnectionResult, Database, DatabaseUser, Deployment, LoadAverage, MetricThresholds,
    Server, ServerMetrics, Site, SslCertificate, SystemUser,
};
pub use ports::{
    BackupOptions, HostingProvider, ProviderRef, ServerConfig, SiteConfig, SystemUserConfig,
};
pub use status::{
    BackupStatus, BackupType, DeploymentStatus, ServerStatus, SiteStatus, SslStatus,
};
