//! Canonical normalization layer
//!
//! Converts arbitrarily-shaped backend payloads into the fixed domain
//! entities. Three rules hold everywhere:
//!
//! - **Fallback field resolution**: each logical field resolves through a
//!   prioritized list of possible backend key names; first present wins,
//!   absence yields the field's default.
//! - **Total status parsing**: status strings map through synonym tables to
//!   the closed enums; unrecognized or absent input becomes `Unknown`.
//! - **Polymorphic dates**: RFC 3339 strings, ISO-ish strings without zone
//!   markers, and Unix timestamps all parse; garbage silently becomes "no
//!   date".
//!
//! Serialization back to flat maps (`to_map`) is explicit per entity so the
//! field set is compile-time-checked, and round-trips:
//! `Entity::from_map(&entity.to_map()) == entity`.

pub mod value;

mod backup;
mod database;
mod deployment;
mod server;
mod site;
mod ssl;

pub use value::{
    bool_field, datetime_field, extract_items, f64_field, opt_string_field, parse_datetime, pick,
    string_field, string_list_field, u64_field, unwrap_item, JsonMap,
};
