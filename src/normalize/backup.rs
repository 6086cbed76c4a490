//! Backup normalization

use crate::domain::entities::Backup;
use crate::domain::status::{BackupStatus, BackupType};
use crate::normalize::value::{datetime_field, string_field, u64_field, JsonMap};
use serde_json::json;

impl Backup {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "backup_id"]),
            site_id: string_field(map, &["site_id", "siteId", "site"]),
            backup_type: BackupType::parse(&string_field(map, &["type", "backup_type"])),
            status: BackupStatus::parse(&string_field(map, &["status", "state"])),
            size_bytes: u64_field(map, &["size_bytes", "size", "bytes"]),
            created_at: datetime_field(map, &["created_at", "createdAt", "created"]),
            expires_at: datetime_field(map, &["expires_at", "retained_until"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("site_id".into(), json!(self.site_id));
        map.insert("type".into(), json!(self.backup_type.as_str()));
        map.insert("status".into(), json!(self.status.as_str()));
        if let Some(size) = self.size_bytes {
            map.insert("size_bytes".into(), json!(size));
        }
        if let Some(created) = self.created_at {
            map.insert("created_at".into(), json!(created.to_rfc3339()));
        }
        if let Some(expiry) = self.expires_at {
            map.insert("expires_at".into(), json!(expiry.to_rfc3339()));
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
    fn test_backup_from_map() {
        let backup = Backup::from_map(&map(json!({
            "backup_id": 42,
            "site": "s-1",
            "type": "db",
            "status": "running",
            "size": "2048"
        })));
        assert_eq!(backup.id, "42");
        assert_eq!(backup.backup_type, BackupType::Database);
        assert_eq!(backup.status, BackupStatus::InProgress);
        assert_eq!(backup.size_bytes, Some(2048));
    }

    #[test]
    fn test_unrecognized_type_defaults_to_full() {
        let backup = Backup::from_map(&map(json!({ "type": "exotic" })));
        assert_eq!(backup.backup_type, BackupType::Full);
    }

    #[test]
    fn test_round_trip() {
        let backup = Backup::from_map(&map(json!({
            "id": "b-1",
            "site_id": "s-1",
            "type": "files",
            "status": "completed",
            "size_bytes": 1048576,
            "created_at": "2025-02-01T00:00:00Z",
            "expires_at": "2025-03-01T00:00:00Z"
        })));
        assert_eq!(Backup::from_map(&backup.to_map()), backup);
    }
}
