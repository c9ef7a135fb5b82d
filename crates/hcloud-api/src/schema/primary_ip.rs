use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::{Datacenter, Labels, Protection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryIp {
    pub id: i64,
    pub ip: String,
    #[serde(default)]
    pub labels: Labels,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub protection: Protection,
    #[serde(default)]
    pub dns_ptr: Vec<PrimaryIpDnsPtr>,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    pub assignee_type: String,
    pub auto_delete: bool,
    pub blocked: bool,
    pub created: DateTime<Utc>,
    pub datacenter: Datacenter,
}

/// Reverse DNS entry for one address of the Primary IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryIpDnsPtr {
    pub dns_ptr: String,
    pub ip: String,
}

// ── Requests / responses ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PrimaryIpCreateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub assignee_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryIpCreateResponse {
    pub primary_ip: PrimaryIp,
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PrimaryIpUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryIpUpdateResponse {
    pub primary_ip: PrimaryIp,
}

/// `dns_ptr: null` resets the pointer to the default value.
#[derive(Debug, Clone, Serialize)]
pub struct PrimaryIpActionChangeDnsPtrRequest {
    pub ip: String,
    pub dns_ptr: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrimaryIpActionAssignRequest {
    pub assignee_id: i64,
    pub assignee_type: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PrimaryIpActionChangeProtectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reset_dns_ptr_sends_explicit_null() {
        let req = PrimaryIpActionChangeDnsPtrRequest {
            ip: "131.232.99.1".into(),
            dns_ptr: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "ip": "131.232.99.1", "dns_ptr": null })
        );
    }

    #[test]
    fn create_request_renames_type() {
        let req = PrimaryIpCreateRequest {
            name: "edge".into(),
            kind: "ipv4".into(),
            assignee_type: "server".into(),
            assignee_id: None,
            labels: None,
            auto_delete: None,
            datacenter: Some("fsn1-dc14".into()),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "edge",
                "type": "ipv4",
                "assignee_type": "server",
                "datacenter": "fsn1-dc14"
            })
        );
    }
}
