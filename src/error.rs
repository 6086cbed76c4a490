//! Error types for the hosting bridge
//!
//! Provides structured error types for all components including the driver
//! registry, capability negotiation, the request pipeline, and provider
//! bindings. Factory constructors keep messages deterministic for a given
//! input so callers (and tests) can rely on them.

use crate::domain::capability::Capability;
use thiserror::Error;

/// Unified error type for the bridge
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Authentication failed for '{provider}': {reason}")]
    AuthenticationFailed { provider: String, reason: String },

    // =========================================================================
    // Rate Limiting
    // =========================================================================
    #[error("Rate limit exceeded for '{provider}', retry after {retry_after_secs}s")]
    RateLimited {
        provider: String,
        retry_after_secs: u64,
    },

    // =========================================================================
    // Resource Lookup Errors
    // =========================================================================
    #[error("Server not found on '{provider}': {id}")]
    ServerNotFound { provider: String, id: String },

    #[error("Site not found on '{provider}': {id}")]
    SiteNotFound { provider: String, id: String },

    // =========================================================================
    // Capability / Operation Errors
    // =========================================================================
    #[error("'{provider}' does not support capability: {capability}")]
    UnsupportedCapability {
        provider: String,
        capability: Capability,
    },

    #[error("Operation not implemented by '{provider}': {operation}")]
    OperationNotImplemented { provider: String, operation: String },

    #[error("Unknown hosting driver: {driver}")]
    UnknownDriver { driver: String },

    // =========================================================================
    // Provisioning Errors
    // =========================================================================
    #[error("Provisioning failed for {resource_type} '{resource_id}': {reason}")]
    ProvisioningFailed {
        resource_type: String,
        resource_id: String,
        reason: String,
    },

    #[error("Provisioning timed out for {resource_type} '{resource_id}' after {timeout_secs}s")]
    ProvisioningTimedOut {
        resource_type: String,
        resource_id: String,
        timeout_secs: u64,
    },

    #[error("Invalid {resource_type} configuration: {}", .errors.join("; "))]
    InvalidProvisioningConfig {
        resource_type: String,
        errors: Vec<String>,
    },

    // =========================================================================
    // SSL Errors
    // =========================================================================
    #[error("SSL installation failed for site '{site_id}': {reason}")]
    SslInstallFailed { site_id: String, reason: String },

    #[error("SSL validation failed for domain '{domain}': {reason}")]
    SslValidationFailed { domain: String, reason: String },

    #[error("Invalid SSL certificate: {reason}")]
    InvalidCertificate { reason: String },

    #[error("SSL renewal failed for site '{site_id}': {reason}")]
    SslRenewalFailed { site_id: String, reason: String },

    // =========================================================================
    // API / Transport Errors
    // =========================================================================
    #[error("API request to '{provider}' failed: {status} on {endpoint} after {duration_ms}ms: {message}")]
    Api {
        provider: String,
        status: u16,
        endpoint: String,
        duration_ms: u64,
        message: String,
    },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Authentication failure for invalid, expired, or missing credentials
    pub fn invalid_credentials(provider: impl Into<String>) -> Self {
        Error::AuthenticationFailed {
            provider: provider.into(),
            reason: "invalid or expired credentials".to_string(),
        }
    }

    /// Authentication failure for a credential lacking permission (HTTP 403)
    pub fn insufficient_permissions(provider: impl Into<String>) -> Self {
        Error::AuthenticationFailed {
            provider: provider.into(),
            reason: "insufficient permissions".to_string(),
        }
    }

    /// Rate limit rejection with a caller-facing retry hint
    pub fn rate_limited(provider: impl Into<String>, retry_after_secs: u64) -> Self {
        Error::RateLimited {
            provider: provider.into(),
            retry_after_secs,
        }
    }

    pub fn server_not_found(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Error::ServerNotFound {
            provider: provider.into(),
            id: id.into(),
        }
    }

    pub fn site_not_found(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Error::SiteNotFound {
            provider: provider.into(),
            id: id.into(),
        }
    }

    /// Capability rejection raised by the fail-fast guard before any I/O
    pub fn unsupported_capability(provider: impl Into<String>, capability: Capability) -> Self {
        Error::UnsupportedCapability {
            provider: provider.into(),
            capability,
        }
    }

    /// An operation the backend advertises but the binding has not implemented
    pub fn operation_not_implemented(
        provider: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Error::OperationNotImplemented {
            provider: provider.into(),
            operation: operation.into(),
        }
    }

    pub fn unknown_driver(driver: impl Into<String>) -> Self {
        Error::UnknownDriver {
            driver: driver.into(),
        }
    }

    pub fn provisioning_failed(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::ProvisioningFailed {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            reason: reason.into(),
        }
    }

    pub fn provisioning_timed_out(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Error::ProvisioningTimedOut {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            timeout_secs,
        }
    }

    pub fn invalid_provisioning_config(
        resource_type: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Error::InvalidProvisioningConfig {
            resource_type: resource_type.into(),
            errors,
        }
    }

    pub fn ssl_install_failed(site_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SslInstallFailed {
            site_id: site_id.into(),
            reason: reason.into(),
        }
    }

    pub fn ssl_validation_failed(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SslValidationFailed {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_certificate(reason: impl Into<String>) -> Self {
        Error::InvalidCertificate {
            reason: reason.into(),
        }
    }

    pub fn ssl_renewal_failed(site_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SslRenewalFailed {
            site_id: site_id.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is transient (a retry may succeed)
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited { .. } => true,
            Error::Api { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }

    /// Check if this error is retryable at all
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Error::Configuration(_)
                | Error::UnsupportedCapability { .. }
                | Error::OperationNotImplemented { .. }
                | Error::UnknownDriver { .. }
                | Error::InvalidProvisioningConfig { .. }
                | Error::InvalidCertificate { .. }
        )
    }

    /// Retry-after hint in seconds, when the backend provided one
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// HTTP status code associated with this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::AuthenticationFailed { .. } => Some(401),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the bridge
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_messages_are_deterministic() {
        let err = Error::rate_limited("forge", 42);
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded for 'forge', retry after 42s"
        );

        let err = Error::invalid_credentials("ploi");
        assert_eq!(
            err.to_string(),
            "Authentication failed for 'ploi': invalid or expired credentials"
        );

        let err = Error::insufficient_permissions("ploi");
        assert_eq!(
            err.to_string(),
            "Authentication failed for 'ploi': insufficient permissions"
        );

        let err = Error::server_not_found("runcloud", "srv-9");
        assert_eq!(err.to_string(), "Server not found on 'runcloud': srv-9");
    }

    #[test]
    fn test_invalid_config_joins_validation_errors() {
        let err = Error::invalid_provisioning_config(
            "server",
            vec!["name is required".into(), "region is required".into()],
        );
        assert_eq!(
            err.to_string(),
            "Invalid server configuration: name is required; region is required"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retry_after_surfaced() {
        let err = Error::rate_limited("forge", 17);
        assert_eq!(err.retry_after(), Some(17));
        assert!(err.is_transient());

        let err = Error::invalid_credentials("forge");
        assert_eq!(err.retry_after(), None);
        assert!(!err.is_transient());
    }

    #[test]
    fn test_unsupported_errors_not_retryable() {
        let err = Error::unsupported_capability("gridpane", Capability::DnsManagement);
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "'gridpane' does not support capability: dns_management"
        );

        let err = Error::operation_not_implemented("gridpane", "createServer");
        assert!(!err.is_retryable());

        let err = Error::unknown_driver("cpanel");
        assert_eq!(err.to_string(), "Unknown hosting driver: cpanel");
    }

    #[test]
    fn test_ssl_and_provisioning_factories() {
        let err = Error::ssl_install_failed("site-1", "dns not pointed");
        assert_eq!(
            err.to_string(),
            "SSL installation failed for site 'site-1': dns not pointed"
        );

        let err = Error::ssl_validation_failed("example.com", "challenge failed");
        assert_eq!(
            err.to_string(),
            "SSL validation failed for domain 'example.com': challenge failed"
        );

        let err = Error::ssl_renewal_failed("site-1", "certificate authority unreachable");
        assert!(err.to_string().starts_with("SSL renewal failed for site 'site-1'"));

        let err = Error::provisioning_timed_out("server", "srv-1", 300);
        assert_eq!(
            err.to_string(),
            "Provisioning timed out for server 'srv-1' after 300s"
        );

        let err = Error::invalid_certificate("key does not match certificate");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_api_error_transience() {
        let gateway = Error::Api {
            provider: "forge".into(),
            status: 503,
            endpoint: "servers".into(),
            duration_ms: 120,
            message: "service unavailable".into(),
        };
        assert!(gateway.is_transient());
        assert_eq!(gateway.status_code(), Some(503));

        let not_found = Error::Api {
            provider: "forge".into(),
            status: 404,
            endpoint: "servers/9".into(),
            duration_ms: 80,
            message: "not found".into(),
        };
        assert!(!not_found.is_transient());
    }
}
