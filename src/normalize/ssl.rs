//! SSL certificate normalization

use crate::domain::entities::SslCertificate;
use crate::domain::status::SslStatus;
use crate::normalize::value::{datetime_field, string_field, string_list_field, JsonMap};
use serde_json::json;

impl SslCertificate {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "certificate_id"]),
            site_id: string_field(map, &["site_id", "siteId", "site"]),
            domains: string_list_field(map, &["domains", "domain", "common_name"]),
            status: SslStatus::parse(&string_field(map, &["status", "state"])),
            expires_at: datetime_field(map, &["expires_at", "expiration", "valid_until"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("site_id".into(), json!(self.site_id));
        map.insert("domains".into(), json!(self.domains));
        map.insert("status".into(), json!(self.status.as_str()));
        if let Some(expiry) = self.expires_at {
            map.insert("expires_at".into(), json!(expiry.to_rfc3339()));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn map(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_single_domain_coerced_to_list() {
        let cert = SslCertificate::from_map(&map(json!({
            "id": "c-1",
            "domain": "example.com",
            "status": "installed"
        })));
        assert_eq!(cert.domains, vec!["example.com"]);
        assert_eq!(cert.status, SslStatus::Active);
    }

    #[test]
    fn test_expiry_from_unix_timestamp() {
        let cert = SslCertificate::from_map(&map(json!({
            "id": "c-2",
            "expiration": 1767225600
        })));
        assert_eq!(cert.expires_at.unwrap().timestamp(), 1767225600);
    }

    #[test]
    fn test_round_trip() {
        let cert = SslCertificate {
            id: "c-3".into(),
            site_id: "s-1".into(),
            domains: vec!["a.test".into(), "www.a.test".into()],
            status: SslStatus::Active,
            expires_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
        };
        assert_eq!(SslCertificate::from_map(&cert.to_map()), cert);
    }
}
