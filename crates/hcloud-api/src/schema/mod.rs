// Wire schema for the Hetzner Cloud API.
//
// These types mirror the JSON payloads field-for-field. Nullable wire fields
// are `Option` so "absent" survives decoding; request types skip `None` on
// the way out so an unset field is never sent as a zero value.

pub mod action;
pub mod firewall;
pub mod primary_ip;
pub mod volume;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use action::{Action, ActionError, ActionResourceReference, ActionResponse, ActionsResponse};
pub use firewall::{Firewall, FirewallResource, FirewallRule};
pub use primary_ip::PrimaryIp;
pub use volume::Volume;

/// Label map as it appears on the wire.
pub type Labels = HashMap<String, String>;

// ── Envelope metadata ───────────────────────────────────────────────

/// The `meta` object attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block under `meta.pagination`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total_entries: Option<u64>,
}

// ── Error envelope ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

// ── Shared sub-objects ──────────────────────────────────────────────

/// Reference accepted by create endpoints that take either an ID or a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdOrName {
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protection {
    pub delete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub network_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: Location,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pagination_tolerates_null_pages() {
        let meta: Meta = serde_json::from_value(json!({
            "pagination": {
                "page": 3,
                "per_page": 2,
                "previous_page": 2,
                "next_page": null,
                "last_page": 3,
                "total_entries": 6
            }
        }))
        .unwrap();

        let pagination = meta.pagination.unwrap();
        assert_eq!(pagination.page, 3);
        assert_eq!(pagination.next_page, None);
        assert_eq!(pagination.total_entries, Some(6));
    }

    #[test]
    fn id_or_name_serializes_untagged() {
        assert_eq!(serde_json::to_value(IdOrName::Id(7)).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(IdOrName::Name("fsn1".into())).unwrap(),
            json!("fsn1")
        );
    }

    #[test]
    fn error_envelope_decodes() {
        let resp: ErrorResponse = serde_json::from_value(json!({
            "error": { "code": "not_found", "message": "volume not found", "details": {} }
        }))
        .unwrap();
        assert_eq!(resp.error.code, "not_found");
        assert_eq!(resp.error.message, "volume not found");
    }
}
