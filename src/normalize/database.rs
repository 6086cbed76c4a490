//! Database, database-user, and system-user normalization

use crate::domain::entities::{Database, DatabaseUser, SystemUser};
use crate::normalize::value::{string_field, string_list_field, JsonMap};
use serde_json::json;

impl Database {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "database_id"]),
            name: string_field(map, &["name", "database_name", "db_name"]),
            server_id: string_field(map, &["server_id", "serverId", "server"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("name".into(), json!(self.name));
        map.insert("server_id".into(), json!(self.server_id));
        map
    }
}

impl DatabaseUser {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "user_id"]),
            username: string_field(map, &["username", "user", "name"]),
            server_id: string_field(map, &["server_id", "serverId", "server"]),
            databases: string_list_field(map, &["databases", "database_names", "grants"])
                .into_iter()
                .collect(),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("username".into(), json!(self.username));
        map.insert("server_id".into(), json!(self.server_id));
        map.insert(
            "databases".into(),
            json!(self.databases.iter().collect::<Vec<_>>()),
        );
        map
    }
}

impl SystemUser {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "user_id"]),
            username: string_field(map, &["username", "user", "name"]),
            server_id: string_field(map, &["server_id", "serverId", "server"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("username".into(), json!(self.username));
        map.insert("server_id".into(), json!(self.server_id));
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
    fn test_database_fallback_keys() {
        let primary = Database::from_map(&map(json!({
            "id": "11", "name": "app", "server_id": "2"
        })));
        let secondary = Database::from_map(&map(json!({
            "database_id": 11, "db_name": "app", "server": "2"
        })));
        assert_eq!(primary, secondary);
    }

    #[test]
    fn test_database_user_grants() {
        let user = DatabaseUser::from_map(&map(json!({
            "id": "4",
            "user": "app_rw",
            "grants": ["app", "app_sessions"]
        })));
        assert_eq!(user.username, "app_rw");
        assert!(user.databases.contains("app_sessions"));
    }

    #[test]
    fn test_round_trips() {
        let database = Database {
            id: "1".into(),
            name: "app".into(),
            server_id: "2".into(),
        };
        assert_eq!(Database::from_map(&database.to_map()), database);

        let user = DatabaseUser {
            id: "4".into(),
            username: "app_rw".into(),
            server_id: "2".into(),
            databases: ["app".to_string()].into_iter().collect(),
        };
        assert_eq!(DatabaseUser::from_map(&user.to_map()), user);

        let system_user = SystemUser {
            id: "8".into(),
            username: "deploy".into(),
            server_id: "2".into(),
        };
        assert_eq!(SystemUser::from_map(&system_user.to_map()), system_user);
    }
}
