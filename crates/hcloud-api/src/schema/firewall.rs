use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Labels;
use super::action::Action;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub rules: Vec<FirewallRule>,
    #[serde(default)]
    pub applied_to: Vec<FirewallResource>,
}

/// A rule as sent and received. Empty IP lists are omitted on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub direction: String,
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Discriminated by `type`: `server` or `label_selector`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<FirewallResourceServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<FirewallResourceLabelSelector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResourceServer {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResourceLabelSelector {
    pub selector: String,
}

// ── Requests / responses ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct FirewallCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FirewallRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apply_to: Vec<FirewallResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallCreateResponse {
    pub firewall: Firewall,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FirewallUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallUpdateResponse {
    pub firewall: Firewall,
}

/// `rules` is always sent: an empty list clears every rule.
#[derive(Debug, Clone, Serialize)]
pub struct FirewallActionSetRulesRequest {
    pub rules: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirewallActionApplyToResourcesRequest {
    pub apply_to: Vec<FirewallResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirewallActionRemoveFromResourcesRequest {
    pub remove_from: Vec<FirewallResource>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn create_request_omits_absent_fields() {
        let req = FirewallCreateRequest {
            name: "web".into(),
            labels: None,
            rules: Vec::new(),
            apply_to: Vec::new(),
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "name": "web" }));
    }

    #[test]
    fn update_request_keeps_empty_labels() {
        let req = FirewallUpdateRequest {
            name: None,
            labels: Some(Labels::new()),
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "labels": {} }));
    }

    #[test]
    fn set_rules_request_sends_empty_list() {
        let req = FirewallActionSetRulesRequest { rules: Vec::new() };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "rules": [] }));
    }

    #[test]
    fn label_selector_resource_decodes() {
        let resource: FirewallResource = serde_json::from_value(json!({
            "type": "label_selector",
            "label_selector": { "selector": "env=prod" }
        }))
        .unwrap();
        assert_eq!(resource.kind, "label_selector");
        assert_eq!(resource.server, None);
        assert_eq!(resource.label_selector.unwrap().selector, "env=prod");
    }
}
