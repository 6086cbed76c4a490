//! Server, metrics, and connection-probe normalization

use crate::domain::entities::{ConnectionResult, LoadAverage, Server, ServerMetrics};
use crate::domain::status::ServerStatus;
use crate::normalize::value::{
    bool_field, datetime_field, f64_field, pick, string_field, u64_field, JsonMap,
};
use serde_json::{json, Value};

impl Server {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            id: string_field(map, &["id", "server_id"]),
            name: string_field(map, &["name", "label", "hostname"]),
            ip_address: string_field(map, &["ip_address", "ip", "ipv4", "public_ip"]),
            region: string_field(map, &["region", "datacenter", "location"]),
            size: string_field(map, &["size", "plan", "instance_type"]),
            php_version: string_field(map, &["php_version", "php"]),
            status: ServerStatus::parse(&string_field(map, &["status", "state"])),
            metrics: pick(map, &["metrics", "stats", "usage"])
                .and_then(Value::as_object)
                .map(ServerMetrics::from_map),
            created_at: datetime_field(map, &["created_at", "createdAt", "created"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("id".into(), json!(self.id));
        map.insert("name".into(), json!(self.name));
        map.insert("ip_address".into(), json!(self.ip_address));
        map.insert("region".into(), json!(self.region));
        map.insert("size".into(), json!(self.size));
        map.insert("php_version".into(), json!(self.php_version));
        map.insert("status".into(), json!(self.status.as_str()));
        if let Some(metrics) = &self.metrics {
            map.insert("metrics".into(), Value::Object(metrics.to_map()));
        }
        if let Some(created) = self.created_at {
            map.insert("created_at".into(), json!(created.to_rfc3339()));
        }
        map
    }
}

impl LoadAverage {
    /// Accepts `{"one_minute": ..}` objects, `{"1m": ..}` shorthand, and
    /// bare `[1m, 5m, 15m]` arrays
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(obj) = value.as_object() {
            return Some(Self {
                one_minute: f64_field(obj, &["one_minute", "1m", "one"]).unwrap_or(0.0),
                five_minutes: f64_field(obj, &["five_minutes", "5m", "five"]).unwrap_or(0.0),
                fifteen_minutes: f64_field(obj, &["fifteen_minutes", "15m", "fifteen"])
                    .unwrap_or(0.0),
            });
        }

        let items = value.as_array()?;
        let mut loads = items.iter().filter_map(Value::as_f64);
        Some(Self {
            one_minute: loads.next()?,
            five_minutes: loads.next().unwrap_or(0.0),
            fifteen_minutes: loads.next().unwrap_or(0.0),
        })
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("one_minute".into(), json!(self.one_minute));
        map.insert("five_minutes".into(), json!(self.five_minutes));
        map.insert("fifteen_minutes".into(), json!(self.fifteen_minutes));
        map
    }
}

impl ServerMetrics {
    /// Build from a loosely-shaped backend payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            cpu_usage: f64_field(map, &["cpu_usage", "cpu", "cpu_percent"]),
            memory_usage: f64_field(map, &["memory_usage", "memory", "memory_percent"]),
            disk_usage: f64_field(map, &["disk_usage", "disk", "disk_percent"]),
            load_average: pick(map, &["load_average", "load"]).and_then(LoadAverage::from_value),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        if let Some(cpu) = self.cpu_usage {
            map.insert("cpu_usage".into(), json!(cpu));
        }
        if let Some(memory) = self.memory_usage {
            map.insert("memory_usage".into(), json!(memory));
        }
        if let Some(disk) = self.disk_usage {
            map.insert("disk_usage".into(), json!(disk));
        }
        if let Some(load) = &self.load_average {
            map.insert("load_average".into(), Value::Object(load.to_map()));
        }
        map
    }
}

impl ConnectionResult {
    /// Build from a loosely-shaped payload
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            success: bool_field(map, &["success", "ok"]),
            message: string_field(map, &["message", "status_message"]),
            status_code: u64_field(map, &["status_code", "status"]).map(|code| code as u16),
            latency_ms: u64_field(map, &["latency_ms", "latency"]),
        }
    }

    /// Flatten to the canonical key vocabulary
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("success".into(), json!(self.success));
        map.insert("message".into(), json!(self.message));
        if let Some(code) = self.status_code {
            map.insert("status_code".into(), json!(code));
        }
        if let Some(latency) = self.latency_ms {
            map.insert("latency_ms".into(), json!(latency));
        }
        map
    }
}
