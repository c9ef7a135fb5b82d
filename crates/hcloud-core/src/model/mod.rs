// ── Domain model ──
//
// Immutable snapshots returned by the resource clients. Mutation always
// happens by issuing a request and receiving a new snapshot.

pub mod action;
pub mod common;
pub mod firewall;
pub mod primary_ip;
pub mod volume;

pub use action::{Action, ActionError, ActionResource, ActionStatus};
pub use common::{Datacenter, Labels, Location, LocationRef, Protection};
pub use firewall::{
    Firewall, FirewallResource, FirewallRule, FirewallRuleDirection, FirewallRuleProtocol,
};
pub use primary_ip::{PrimaryIp, PrimaryIpDnsPtr, PrimaryIpType};
pub use volume::{Volume, VolumeFormat, VolumeStatus};
