// Shared fixtures for the resource client integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::MockServer;

use hcloud_core::{Client, ClientConfig};

pub async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = ClientConfig {
        endpoint: server.uri().parse().unwrap(),
        token: SecretString::from("test-token".to_owned()),
        timeout: Duration::from_secs(5),
        user_agent: None,
    };
    let client = Client::from_config(&config).unwrap();
    (server, client)
}

pub fn meta(page: u32, per_page: u32, next_page: Option<u32>, last_page: u32) -> Value {
    json!({
        "pagination": {
            "page": page,
            "per_page": per_page,
            "previous_page": if page > 1 { Some(page - 1) } else { None },
            "next_page": next_page,
            "last_page": last_page,
            "total_entries": per_page * last_page
        }
    })
}

pub fn location() -> Value {
    json!({
        "id": 1,
        "name": "fsn1",
        "description": "Falkenstein DC Park 1",
        "country": "DE",
        "city": "Falkenstein",
        "latitude": 50.47612,
        "longitude": 12.370071,
        "network_zone": "eu-central"
    })
}

pub fn action(id: i64, command: &str, status: &str) -> Value {
    json!({
        "id": id,
        "command": command,
        "status": status,
        "progress": if status == "running" { 0 } else { 100 },
        "started": "2024-03-01T10:00:00Z",
        "finished": if status == "running" { None } else { Some("2024-03-01T10:00:05Z") },
        "resources": [],
        "error": null
    })
}

pub fn firewall(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "labels": {},
        "created": "2024-03-01T10:00:00Z",
        "rules": [],
        "applied_to": []
    })
}

pub fn volume(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": "available",
        "server": null,
        "location": location(),
        "size": 10,
        "format": "ext4",
        "protection": { "delete": false },
        "labels": {},
        "linux_device": format!("/dev/disk/by-id/scsi-0HC_Volume_{id}"),
        "created": "2024-03-01T10:00:00Z"
    })
}

pub fn primary_ip(id: i64, name: &str, ip: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "ip": ip,
        "labels": {},
        "name": name,
        "type": kind,
        "protection": { "delete": false },
        "dns_ptr": [],
        "assignee_id": null,
        "assignee_type": "server",
        "auto_delete": false,
        "blocked": false,
        "created": "2024-03-01T10:00:00Z",
        "datacenter": { "id": 4, "name": "fsn1-dc14", "description": "Falkenstein 1 DC14", "location": location() }
    })
}

pub fn not_found(kind: &str, id: i64) -> Value {
    json!({
        "error": {
            "code": "not_found",
            "message": format!("{kind} with ID '{id}' not found"),
            "details": {}
        }
    })
}

// ── Domain snapshots ────────────────────────────────────────────────

pub fn firewall_entity(id: i64, name: &str) -> hcloud_core::Firewall {
    let wire: hcloud_api::schema::Firewall = serde_json::from_value(firewall(id, name)).unwrap();
    hcloud_core::Firewall::try_from(wire).unwrap()
}

pub fn volume_entity(id: i64, name: &str) -> hcloud_core::Volume {
    let wire: hcloud_api::schema::Volume = serde_json::from_value(volume(id, name)).unwrap();
    hcloud_core::Volume::try_from(wire).unwrap()
}

pub fn primary_ip_entity(id: i64, name: &str, ip: &str, kind: &str) -> hcloud_core::PrimaryIp {
    let wire: hcloud_api::schema::PrimaryIp =
        serde_json::from_value(primary_ip(id, name, ip, kind)).unwrap();
    hcloud_core::PrimaryIp::try_from(wire).unwrap()
}

pub fn action_entity(id: i64, command: &str, status: &str) -> hcloud_core::Action {
    let wire: hcloud_api::schema::Action = serde_json::from_value(action(id, command, status)).unwrap();
    hcloud_core::Action::try_from(wire).unwrap()
}
