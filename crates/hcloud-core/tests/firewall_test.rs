#![allow(clippy::unwrap_used)]
// Firewall client tests through the real HTTP transport.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use hcloud_core::{
    CoreError, FirewallCreateOpts, FirewallResource, FirewallRule, FirewallRuleDirection,
    FirewallRuleProtocol, FirewallSetRulesOpts, FirewallUpdateOpts, Labels,
};

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_web_firewall_without_targets() {
    let (server, client) = common::setup().await;

    let mut created = common::firewall(38, "web");
    created["rules"] = json!([
        { "direction": "in", "protocol": "tcp", "port": "80", "source_ips": [], "destination_ips": [] }
    ]);

    Mock::given(method("POST"))
        .and(path("/firewalls"))
        .and(body_json(json!({
            "name": "web",
            "rules": [{ "direction": "in", "protocol": "tcp", "port": "80" }]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "firewall": created, "actions": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let opts = FirewallCreateOpts {
        name: "web".into(),
        rules: vec![FirewallRule::inbound(FirewallRuleProtocol::Tcp).with_port("80")],
        ..FirewallCreateOpts::default()
    };
    let (result, _) = client.firewalls().create(&opts).await.unwrap();

    assert_eq!(result.firewall.name, "web");
    assert_eq!(result.firewall.rules.len(), 1);
    assert_eq!(result.firewall.rules[0].direction, FirewallRuleDirection::In);
    assert!(result.actions.is_empty());
}

#[tokio::test]
async fn test_create_with_targets_returns_apply_actions() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/firewalls"))
        .and(body_json(json!({
            "name": "edge",
            "labels": { "env": "prod" },
            "apply_to": [
                { "type": "server", "server": { "id": 42 } },
                { "type": "label_selector", "label_selector": { "selector": "role=web" } }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "firewall": common::firewall(39, "edge"),
            "actions": [
                common::action(1, "apply_firewall", "running"),
                common::action(2, "apply_firewall", "running")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = FirewallCreateOpts {
        name: "edge".into(),
        labels: Some(Labels::from([("env".to_owned(), "prod".to_owned())])),
        rules: Vec::new(),
        apply_to: vec![
            FirewallResource::Server { id: 42 },
            FirewallResource::LabelSelector {
                selector: "role=web".into(),
            },
        ],
    };
    let (result, _) = client.firewalls().create(&opts).await.unwrap();

    let ids: Vec<i64> = result.actions.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_create_without_name_is_rejected_locally() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/firewalls"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .firewalls()
        .create(&FirewallCreateOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { ref message } if message == "missing name"));
}

// ── Lookup ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_duplicate_names_are_ambiguous() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/firewalls"))
        .and(query_param("name", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firewalls": [common::firewall(1, "web"), common::firewall(2, "web")],
            "meta": common::meta(1, 25, None, 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.firewalls().get_by_name("web").await.unwrap_err();
    match err {
        CoreError::AmbiguousName {
            kind,
            name,
            matches,
        } => {
            assert_eq!(kind, "firewall");
            assert_eq!(name, "web");
            assert_eq!(matches, 2);
        }
        other => panic!("expected AmbiguousName, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_name_is_none() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/firewalls"))
        .and(query_param("name", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firewalls": [],
            "meta": common::meta(1, 25, None, 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (firewall, response) = client.firewalls().get("ghost").await.unwrap();
    assert!(firewall.is_none());
    assert_eq!(response.status, 200);
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_rename_leaves_labels_untouched() {
    let (server, client) = common::setup().await;

    Mock::given(method("PUT"))
        .and(path("/firewalls/38"))
        .and(body_json(json!({ "name": "web-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firewall": common::firewall(38, "web-2")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = FirewallUpdateOpts {
        name: Some("web-2".into()),
        labels: None,
    };
    let (updated, _) = client
        .firewalls()
        .update(&common::firewall_entity(38, "web"), &opts)
        .await
        .unwrap();
    assert_eq!(updated.name, "web-2");
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_rules_with_empty_list_clears_rules() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/firewalls/38/actions/set_rules"))
        .and(body_json(json!({ "rules": [] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "actions": [common::action(5, "set_firewall_rules", "running")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (actions, _) = client
        .firewalls()
        .set_rules(
            &common::firewall_entity(38, "web"),
            &FirewallSetRulesOpts::default(),
        )
        .await
        .unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].command, "set_firewall_rules");
}

#[tokio::test]
async fn test_apply_and_remove_resources() {
    let (server, client) = common::setup().await;
    let firewall = common::firewall_entity(38, "web");
    let targets = [FirewallResource::Server { id: 42 }];

    Mock::given(method("POST"))
        .and(path("/firewalls/38/actions/apply_to_resources"))
        .and(body_json(json!({ "apply_to": [{ "type": "server", "server": { "id": 42 } }] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "actions": [common::action(6, "apply_firewall", "running")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/firewalls/38/actions/remove_from_resources"))
        .and(body_json(json!({ "remove_from": [{ "type": "server", "server": { "id": 42 } }] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "actions": [common::action(7, "remove_firewall", "running")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let firewalls = client.firewalls();
    let (applied, _) = firewalls.apply_resources(&firewall, &targets).await.unwrap();
    let (removed, _) = firewalls.remove_resources(&firewall, &targets).await.unwrap();

    assert_eq!(applied[0].id, 6);
    assert_eq!(removed[0].id, 7);
}

#[tokio::test]
async fn test_locked_firewall_surfaces_api_error() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/firewalls/38/actions/set_rules"))
        .respond_with(ResponseTemplate::new(423).set_body_json(json!({
            "error": { "code": "locked", "message": "firewall is locked" }
        })))
        .mount(&server)
        .await;

    let err = client
        .firewalls()
        .set_rules(
            &common::firewall_entity(38, "web"),
            &FirewallSetRulesOpts::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(&hcloud_api::ErrorCode::Locked));
}
