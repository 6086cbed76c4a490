//! Deployment normalization

use crate::domain::entities::Deployment;
use crate::domain::status::DeploymentStatus;
use crate::normalize::value::{datetime_field, string_field, JsonMap};
use serde_json::json;

impl Deployment {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "deployment_id"]),
            site_id: string_field(map, &["site_id", "siteId", "site"]),
            commit_hash: string_field(map, &["commit_hash", "commit", "sha"]),
            status: DeploymentStatus::parse(&string_field(map, &["status", "state"])),
            started_at: datetime_field(map, &["started_at", "created_at"]),
            finished_at: datetime_field(map, &["finished_at", "ended_at", "completed_at"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("site_id".into(), json!(self.site_id));
        map.insert("commit_hash".into(), json!(self.commit_hash));
        map.insert("status".into(), json!(self.status.as_str()));
        if let Some(started) = self.started_at {
            map.insert("started_at".into(), json!(started.to_rfc3339()));
        }
        if let Some(finished) = self.finished_at {
            map.insert("finished_at".into(), json!(finished.to_rfc3339()));
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
    fn test_duration_from_timestamps() {
        let deployment = Deployment::from_map(&map(json!({
            "started_at": "2025-01-01T10:00:00Z",
            "finished_at": "2025-01-01T10:05:00Z"
        })));
        assert_eq!(deployment.duration_seconds(), Some(300));
    }

    #[test]
    fn test_commit_hash_fallbacks() {
        let primary = Deployment::from_map(&map(json!({ "commit_hash": "abc123" })));
        let secondary = Deployment::from_map(&map(json!({ "sha": "abc123" })));
        assert_eq!(primary.commit_hash, secondary.commit_hash);
    }

    #[test]
    fn test_in_flight_deployment() {
        let deployment = Deployment::from_map(&map(json!({
            "id": 77,
            "status": "deploying",
            "started_at": 1735725600
        })));
        assert_eq!(deployment.status, DeploymentStatus::Running);
        assert_eq!(deployment.duration_seconds(), None);
    }

    #[test]
    fn test_round_trip() {
        let deployment = Deployment::from_map(&map(json!({
            "id": "d-1",
            "site_id": "s-1",
            "commit": "f00dcafe",
            "status": "success",
            "started_at": "2025-01-01T10:00:00Z",
            "finished_at": "2025-01-01T10:05:00Z"
        })));
        assert_eq!(Deployment::from_map(&deployment.to_map()), deployment);
    }
}
