//! Loosely-typed value extraction
//!
//! Backends disagree on key names, scalar types, and date encodings. The
//! helpers here resolve a logical field through a prioritized key list and
//! coerce whatever shape the backend sent. Extraction never fails: absence
//! and garbage collapse to the field's default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Raw backend payload object
pub type JsonMap = serde_json::Map<String, Value>;

// =============================================================================
// Fallback Key Resolution
// =============================================================================

/// Resolve a logical field through a prioritized key list. First key present
/// with a non-null value wins.
pub fn pick<'a>(map: &'a JsonMap, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// String field; numbers and booleans are coerced. Defaults to empty string.
pub fn string_field(map: &JsonMap, keys: &[&str]) -> String {
    opt_string_field(map, keys).unwrap_or_default()
}

/// Optional string field; numbers and booleans are coerced
pub fn opt_string_field(map: &JsonMap, keys: &[&str]) -> Option<String> {
    match pick(map, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boolean field; accepts booleans, truthy strings, and numbers
pub fn bool_field(map: &JsonMap, keys: &[&str]) -> bool {
    match pick(map, keys) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0),
        Some(Value::String(s)) => {
            matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "1" | "yes" | "on" | "enabled"
            )
        }
        _ => false,
    }
}

/// Unsigned integer field; numeric strings are parsed
pub fn u64_field(map: &JsonMap, keys: &[&str]) -> Option<u64> {
    match pick(map, keys)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|v| v.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Float field; numeric strings are parsed
pub fn f64_field(map: &JsonMap, keys: &[&str]) -> Option<f64> {
    match pick(map, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String list field; accepts arrays of scalars, a single scalar, or a
/// comma-separated string
pub fn string_list_field(map: &JsonMap, keys: &[&str]) -> Vec<String> {
    match pick(map, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

// =============================================================================
// Date Parsing
// =============================================================================

/// Polymorphic date parsing: RFC 3339 / ISO-ish strings, Unix timestamps in
/// seconds or milliseconds. Unparsable input silently yields `None`.
pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(timestamp_to_datetime),
        Value::String(s) => parse_datetime_str(s),
        _ => None,
    }
}

/// Date field resolved through a key list
pub fn datetime_field(map: &JsonMap, keys: &[&str]) -> Option<DateTime<Utc>> {
    pick(map, keys).and_then(parse_datetime)
}

fn timestamp_to_datetime(raw: i64) -> Option<DateTime<Utc>> {
    // Heuristic: values past the year ~33658 in seconds are millisecond stamps
    if raw.abs() >= 1_000_000_000_000 {
        Utc.timestamp_millis_opt(raw).single()
    } else {
        Utc.timestamp_opt(raw, 0).single()
    }
}

fn parse_datetime_str(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Panel APIs without timezone markers report UTC
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    trimmed.parse::<i64>().ok().and_then(timestamp_to_datetime)
}

// =============================================================================
// Envelope Unwrapping
// =============================================================================

/// Collection payloads arrive either bare (`[...]`) or wrapped
/// (`{"data": [...]}`, `{"servers": [...]}`). Returns the item objects.
pub fn extract_items<'a>(value: &'a Value, keys: &[&str]) -> Vec<&'a JsonMap> {
    if let Some(items) = value.as_array() {
        return items.iter().filter_map(Value::as_object).collect();
    }

    if let Some(obj) = value.as_object() {
        for key in keys.iter().chain(std::iter::once(&"data")) {
            if let Some(items) = obj.get(*key).and_then(Value::as_array) {
                return items.iter().filter_map(Value::as_object).collect();
            }
        }
    }

    Vec::new()
}

/// Single-item payloads arrive bare (`{...}`) or wrapped
/// (`{"server": {...}}`, `{"data": {...}}`)
pub fn unwrap_item<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a JsonMap> {
    let obj = value.as_object()?;
    for key in keys.iter().chain(std::iter::once(&"data")) {
        if let Some(inner) = obj.get(*key).and_then(Value::as_object) {
            return Some(inner);
        }
    }
    Some(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_pick_prefers_primary_and_skips_null() {
        let payload = map(json!({ "id": null, "server_id": "42" }));
        assert_eq!(string_field(&payload, &["id", "server_id"]), "42");

        let payload = map(json!({ "id": 7, "server_id": "42" }));
        assert_eq!(string_field(&payload, &["id", "server_id"]), "7");
    }

    #[test]
    fn test_string_field_defaults_to_empty() {
        let payload = map(json!({}));
        assert_eq!(string_field(&payload, &["id"]), "");
        assert_eq!(opt_string_field(&payload, &["id"]), None);
    }

    #[test]
    fn test_bool_field_coercion() {
        let payload = map(json!({
            "a": true, "b": "yes", "c": 1, "d": "0", "e": "enabled", "f": 0
        }));
        assert!(bool_field(&payload, &["a"]));
        assert!(bool_field(&payload, &["b"]));
        assert!(bool_field(&payload, &["c"]));
        assert!(!bool_field(&payload, &["d"]));
        assert!(bool_field(&payload, &["e"]));
        assert!(!bool_field(&payload, &["f"]));
        assert!(!bool_field(&payload, &["missing"]));
    }

    #[test]
    fn test_numeric_fields_accept_strings() {
        let payload = map(json!({ "size": "1048576", "cpu": "42.5" }));
        assert_eq!(u64_field(&payload, &["size"]), Some(1_048_576));
        assert_eq!(f64_field(&payload, &["cpu"]), Some(42.5));
    }

    #[test]
    fn test_string_list_shapes() {
        let payload = map(json!({ "a": ["x", "y"], "b": "x, y,", "c": "x" }));
        assert_eq!(string_list_field(&payload, &["a"]), vec!["x", "y"]);
        assert_eq!(string_list_field(&payload, &["b"]), vec!["x", "y"]);
        assert_eq!(string_list_field(&payload, &["c"]), vec!["x"]);
        assert!(string_list_field(&payload, &["missing"]).is_empty());
    }

    #[test]
    fn test_datetime_polymorphism() {
        let rfc3339 = parse_datetime(&json!("2025-01-01T10:00:00Z")).unwrap();
        assert_eq!(rfc3339.timestamp(), 1735725600);

        let spaced = parse_datetime(&json!("2025-01-01 10:00:00")).unwrap();
        assert_eq!(spaced, rfc3339);

        let seconds = parse_datetime(&json!(1735725600)).unwrap();
        assert_eq!(seconds, rfc3339);

        let millis = parse_datetime(&json!(1735725600000i64)).unwrap();
        assert_eq!(millis, rfc3339);

        let date_only = parse_datetime(&json!("2025-01-01")).unwrap();
        assert_eq!(date_only.timestamp(), 1735689600);
    }

    #[test]
    fn test_datetime_garbage_is_silent() {
        assert_eq!(parse_datetime(&json!("not a date")), None);
        assert_eq!(parse_datetime(&json!("")), None);
        assert_eq!(parse_datetime(&json!(null)), None);
        assert_eq!(parse_datetime(&json!([1, 2])), None);
    }

    #[test]
    fn test_extract_items_shapes() {
        let bare = json!([{ "id": 1 }, { "id": 2 }]);
        assert_eq!(extract_items(&bare, &["servers"]).len(), 2);

        let wrapped = json!({ "servers": [{ "id": 1 }] });
        assert_eq!(extract_items(&wrapped, &["servers"]).len(), 1);

        let data = json!({ "data": [{ "id": 1 }] });
        assert_eq!(extract_items(&data, &["servers"]).len(), 1);

        let empty = json!({ "unrelated": true });
        assert!(extract_items(&empty, &["servers"]).is_empty());
    }

    #[test]
    fn test_unwrap_item_shapes() {
        let wrapped = json!({ "server": { "id": "1" } });
        let item = unwrap_item(&wrapped, &["server"]).unwrap();
        assert_eq!(item.get("id"), Some(&json!("1")));

        let bare = json!({ "id": "1" });
        let item = unwrap_item(&bare, &["server"]).unwrap();
        assert_eq!(item.get("id"), Some(&json!("1")));

        assert!(unwrap_item(&json!([1]), &["server"]).is_none());
    }
}
