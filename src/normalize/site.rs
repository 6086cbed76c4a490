//! Site normalization

use crate::domain::entities::Site;
use crate::domain::status::{SiteStatus, SslStatus};
use crate::normalize::value::{
    bool_field, datetime_field, string_field, string_list_field, JsonMap,
};
use serde_json::json;

impl Site {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "site_id"]),
            server_id: string_field(map, &["server_id", "serverId", "server"]),
            domain: string_field(map, &["domain", "name", "url"]),
            php_version: string_field(map, &["php_version", "php"]),
            ssl_enabled: bool_field(map, &["ssl_enabled", "ssl", "https", "has_ssl"]),
            ssl_status: SslStatus::parse(&string_field(
                map,
                &["ssl_status", "certificate_status"],
            )),
            aliases: string_list_field(map, &["aliases", "alias_domains", "additional_domains"])
                .into_iter()
                .collect(),
            status: SiteStatus::parse(&string_field(map, &["status", "state"])),
            created_at: datetime_field(map, &["created_at", "createdAt", "created"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("server_id".into(), json!(self.server_id));
        map.insert("domain".into(), json!(self.domain));
        map.insert("php_version".into(), json!(self.php_version));
        map.insert("ssl_enabled".into(), json!(self.ssl_enabled));
        map.insert("ssl_status".into(), json!(self.ssl_status.as_str()));
        map.insert(
            "aliases".into(),
            json!(self.aliases.iter().collect::<Vec<_>>()),
        );
        map.insert("status".into(), json!(self.status.as_str()));
        if let Some(created) = self.created_at {
            map.insert("created_at".into(), json!(created.to_rfc3339()));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn map(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_site_ssl_scenario() {
        let site = Site::from_map(&map(json!({
            "id": "1",
            "domain": "example.com",
            "ssl_enabled": true,
            "ssl_status": "active"
        })));
        assert!(site.has_valid_ssl());
        assert_eq!(site.domain, "example.com");
    }

    #[test]
    fn test_site_fallback_keys_equivalent() {
        let primary = Site::from_map(&map(json!({
            "id": "3", "server_id": "9", "domain": "a.test", "aliases": ["www.a.test"]
        })));
        let secondary = Site::from_map(&map(json!({
            "site_id": "3", "server": 9, "name": "a.test", "alias_domains": "www.a.test"
        })));
        assert_eq!(primary, secondary);
    }

    #[test]
    fn test_alias_order_preserved() {
        let site = Site::from_map(&map(json!({
            "aliases": ["z.test", "a.test", "m.test", "a.test"]
        })));
        let aliases: Vec<_> = site.aliases.iter().cloned().collect();
        assert_eq!(aliases, vec!["z.test", "a.test", "m.test"]);
    }

    #[test]
    fn test_site_unknown_status_total() {
        let site = Site::from_map(&map(json!({ "status": "weird-state" })));
        assert_eq!(site.status, SiteStatus::Unknown);
        assert_eq!(site.ssl_status, SslStatus::Unknown);
    }

    #[test]
    fn test_site_round_trip() {
        let site = Site {
            id: "5".into(),
            server_id: "2".into(),
            domain: "shop.example".into(),
            php_version: "8.2".into(),
            ssl_enabled: true,
            ssl_status: SslStatus::Active,
            aliases: ["www.shop.example".to_string()].into_iter().collect(),
            status: SiteStatus::Active,
            created_at: None,
        };
        assert_eq!(Site::from_map(&site.to_map()), site);
    }
}
