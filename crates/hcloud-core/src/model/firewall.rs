// ── Firewall domain types ──

use chrono::{DateTime, Utc};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::Labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FirewallRuleDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FirewallRuleProtocol {
    Tcp,
    Udp,
    Icmp,
    Esp,
    Gre,
}

/// A single firewall rule.
///
/// `port` is only meaningful for TCP and UDP and may be a range (`"80-85"`)
/// or `"any"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub direction: FirewallRuleDirection,
    pub protocol: FirewallRuleProtocol,
    pub port: Option<String>,
    #[serde(default)]
    pub source_ips: Vec<IpNet>,
    #[serde(default)]
    pub destination_ips: Vec<IpNet>,
    pub description: Option<String>,
}

impl FirewallRule {
    /// Inbound rule with no port, address or description set.
    pub fn inbound(protocol: FirewallRuleProtocol) -> Self {
        Self {
            direction: FirewallRuleDirection::In,
            protocol,
            port: None,
            source_ips: Vec::new(),
            destination_ips: Vec::new(),
            description: None,
        }
    }

    /// Outbound rule with no port, address or description set.
    pub fn outbound(protocol: FirewallRuleProtocol) -> Self {
        Self {
            direction: FirewallRuleDirection::Out,
            ..Self::inbound(protocol)
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }
}

/// What a firewall applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FirewallResource {
    Server { id: i64 },
    LabelSelector { selector: String },
}

impl FirewallResource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Server { .. } => "server",
            Self::LabelSelector { .. } => "label_selector",
        }
    }
}

/// The canonical Firewall type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: i64,
    pub name: String,
    pub labels: Labels,
    pub created: DateTime<Utc>,
    pub rules: Vec<FirewallRule>,
    pub applied_to: Vec<FirewallResource>,
}
