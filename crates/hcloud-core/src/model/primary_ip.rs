// ── Primary IP domain types ──

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::{Datacenter, Labels, Protection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrimaryIpType {
    Ipv4,
    Ipv6,
}

/// Reverse DNS entry for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryIpDnsPtr {
    pub ip: IpAddr,
    pub dns_ptr: String,
}

/// The canonical Primary IP type.
///
/// IPv6 Primary IPs are whole `/64` blocks: `ip` is the network address and
/// `network` carries the prefix. IPv4 entries have no `network`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryIp {
    pub id: i64,
    pub name: String,
    pub ip: IpAddr,
    pub network: Option<IpNet>,
    pub kind: PrimaryIpType,
    pub labels: Labels,
    pub protection: Protection,
    pub dns_ptr: Vec<PrimaryIpDnsPtr>,
    pub assignee_id: Option<i64>,
    pub assignee_type: String,
    pub auto_delete: bool,
    pub blocked: bool,
    pub created: DateTime<Utc>,
    pub datacenter: Datacenter,
}

impl PrimaryIp {
    pub fn is_assigned(&self) -> bool {
        self.assignee_id.is_some()
    }
}
