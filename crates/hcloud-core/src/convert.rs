// ── Wire <-> domain conversions ──
//
// Pure mapping between `hcloud_api::schema` payloads and `crate::model`
// types. Wire-to-domain is fallible only for values the model cannot
// represent (unknown enum strings, malformed addresses), which surface as
// `CoreError::MalformedData`. Absent wire fields stay absent, and every
// collection keeps its order.

use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;

use hcloud_api::schema::{self as wire, IdOrName};
use ipnet::IpNet;

use crate::error::CoreError;
use crate::model::{
    Action, ActionError, ActionResource, ActionStatus, Datacenter, Firewall, FirewallResource,
    FirewallRule, Location, LocationRef, PrimaryIp, PrimaryIpDnsPtr, PrimaryIpType, Protection,
    Volume, VolumeStatus,
};
use crate::resource::{
    FirewallCreateOpts, FirewallUpdateOpts, PrimaryIpCreateOpts, PrimaryIpUpdateOpts,
    VolumeCreateOpts, VolumeUpdateOpts,
};

// ── Helpers ────────────────────────────────────────────────────────

fn parse_enum<T>(field: &str, raw: &str) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| CoreError::malformed(field, format!("{raw:?}: {e}")))
}

fn parse_net(field: &str, raw: &str) -> Result<IpNet, CoreError> {
    raw.parse()
        .map_err(|e| CoreError::malformed(field, format!("{raw:?}: {e}")))
}

fn parse_addr(field: &str, raw: &str) -> Result<IpAddr, CoreError> {
    raw.parse()
        .map_err(|e| CoreError::malformed(field, format!("{raw:?}: {e}")))
}

fn parse_nets(field: &str, raw: &[String]) -> Result<Vec<IpNet>, CoreError> {
    raw.iter().map(|r| parse_net(field, r)).collect()
}

fn format_nets(nets: &[IpNet]) -> Vec<String> {
    nets.iter().map(ToString::to_string).collect()
}

// ── Shared sub-objects ─────────────────────────────────────────────

impl From<wire::Protection> for Protection {
    fn from(p: wire::Protection) -> Self {
        Self { delete: p.delete }
    }
}

impl From<Protection> for wire::Protection {
    fn from(p: Protection) -> Self {
        Self { delete: p.delete }
    }
}

impl From<wire::Location> for Location {
    fn from(l: wire::Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            description: l.description,
            country: l.country,
            city: l.city,
            latitude: l.latitude,
            longitude: l.longitude,
            network_zone: l.network_zone,
        }
    }
}

impl From<&Location> for wire::Location {
    fn from(l: &Location) -> Self {
        Self {
            id: l.id,
            name: l.name.clone(),
            description: l.description.clone(),
            country: l.country.clone(),
            city: l.city.clone(),
            latitude: l.latitude,
            longitude: l.longitude,
            network_zone: l.network_zone.clone(),
        }
    }
}

impl From<wire::Datacenter> for Datacenter {
    fn from(d: wire::Datacenter) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            location: d.location.into(),
        }
    }
}

impl From<&Datacenter> for wire::Datacenter {
    fn from(d: &Datacenter) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            description: d.description.clone(),
            location: (&d.location).into(),
        }
    }
}

impl From<&LocationRef> for IdOrName {
    fn from(r: &LocationRef) -> Self {
        match r {
            LocationRef::Id(id) => Self::Id(*id),
            LocationRef::Name(name) => Self::Name(name.clone()),
        }
    }
}

// ── Action ─────────────────────────────────────────────────────────

impl TryFrom<wire::Action> for Action {
    type Error = CoreError;

    fn try_from(a: wire::Action) -> Result<Self, Self::Error> {
        Ok(Self {
            id: a.id,
            status: parse_enum::<ActionStatus>("action.status", &a.status)?,
            command: a.command,
            progress: a.progress,
            started: a.started,
            finished: a.finished,
            resources: a
                .resources
                .into_iter()
                .map(|r| ActionResource { id: r.id, kind: r.kind })
                .collect(),
            error: a.error.map(|e| ActionError {
                code: e.code,
                message: e.message,
            }),
        })
    }
}

impl From<&Action> for wire::Action {
    fn from(a: &Action) -> Self {
        Self {
            id: a.id,
            command: a.command.clone(),
            status: a.status.to_string(),
            progress: a.progress,
            started: a.started,
            finished: a.finished,
            resources: a
                .resources
                .iter()
                .map(|r| wire::ActionResourceReference {
                    id: r.id,
                    kind: r.kind.clone(),
                })
                .collect(),
            error: a.error.as_ref().map(|e| wire::ActionError {
                code: e.code.clone(),
                message: e.message.clone(),
            }),
        }
    }
}

// ── Firewall ───────────────────────────────────────────────────────

impl TryFrom<wire::FirewallRule> for FirewallRule {
    type Error = CoreError;

    fn try_from(r: wire::FirewallRule) -> Result<Self, Self::Error> {
        Ok(Self {
            direction: parse_enum("firewall.rule.direction", &r.direction)?,
            protocol: parse_enum("firewall.rule.protocol", &r.protocol)?,
            port: r.port,
            source_ips: parse_nets("firewall.rule.source_ips", &r.source_ips)?,
            destination_ips: parse_nets("firewall.rule.destination_ips", &r.destination_ips)?,
            description: r.description,
        })
    }
}

impl From<&FirewallRule> for wire::FirewallRule {
    fn from(r: &FirewallRule) -> Self {
        Self {
            direction: r.direction.to_string(),
            protocol: r.protocol.to_string(),
            port: r.port.clone(),
            source_ips: format_nets(&r.source_ips),
            destination_ips: format_nets(&r.destination_ips),
            description: r.description.clone(),
        }
    }
}

impl TryFrom<wire::FirewallResource> for FirewallResource {
    type Error = CoreError;

    fn try_from(r: wire::FirewallResource) -> Result<Self, Self::Error> {
        match (r.kind.as_str(), r.server, r.label_selector) {
            ("server", Some(server), _) => Ok(Self::Server { id: server.id }),
            ("label_selector", _, Some(selector)) => Ok(Self::LabelSelector {
                selector: selector.selector,
            }),
            (kind, ..) => Err(CoreError::malformed(
                "firewall.applied_to",
                format!("unsupported or incomplete resource of type {kind:?}"),
            )),
        }
    }
}

impl From<&FirewallResource> for wire::FirewallResource {
    fn from(r: &FirewallResource) -> Self {
        let (server, label_selector) = match r {
            FirewallResource::Server { id } => {
                (Some(wire::firewall::FirewallResourceServer { id: *id }), None)
            }
            FirewallResource::LabelSelector { selector } => (
                None,
                Some(wire::firewall::FirewallResourceLabelSelector {
                    selector: selector.clone(),
                }),
            ),
        };
        Self {
            kind: r.kind().to_owned(),
            server,
            label_selector,
        }
    }
}

impl TryFrom<wire::Firewall> for Firewall {
    type Error = CoreError;

    fn try_from(f: wire::Firewall) -> Result<Self, Self::Error> {
        Ok(Self {
            id: f.id,
            name: f.name,
            labels: f.labels,
            created: f.created,
            rules: f
                .rules
                .into_iter()
                .map(FirewallRule::try_from)
                .collect::<Result<_, _>>()?,
            applied_to: f
                .applied_to
                .into_iter()
                .map(FirewallResource::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&Firewall> for wire::Firewall {
    fn from(f: &Firewall) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            labels: f.labels.clone(),
            created: f.created,
            rules: f.rules.iter().map(Into::into).collect(),
            applied_to: f.applied_to.iter().map(Into::into).collect(),
        }
    }
}

impl From<&FirewallCreateOpts> for wire::firewall::FirewallCreateRequest {
    fn from(o: &FirewallCreateOpts) -> Self {
        Self {
            name: o.name.clone(),
            labels: o.labels.clone(),
            rules: o.rules.iter().map(Into::into).collect(),
            apply_to: o.apply_to.iter().map(Into::into).collect(),
        }
    }
}

impl From<&FirewallUpdateOpts> for wire::firewall::FirewallUpdateRequest {
    fn from(o: &FirewallUpdateOpts) -> Self {
        Self {
            name: o.name.clone().filter(|n| !n.is_empty()),
            labels: o.labels.clone(),
        }
    }
}

// ── Volume ─────────────────────────────────────────────────────────

impl TryFrom<wire::Volume> for Volume {
    type Error = CoreError;

    fn try_from(v: wire::Volume) -> Result<Self, Self::Error> {
        Ok(Self {
            id: v.id,
            status: parse_enum::<VolumeStatus>("volume.status", &v.status)?,
            name: v.name,
            server: v.server,
            location: v.location.into(),
            size: v.size,
            format: v.format,
            protection: v.protection.into(),
            labels: v.labels,
            linux_device: v.linux_device,
            created: v.created,
        })
    }
}

impl From<&Volume> for wire::Volume {
    fn from(v: &Volume) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            status: v.status.to_string(),
            server: v.server,
            location: (&v.location).into(),
            size: v.size,
            format: v.format.clone(),
            protection: v.protection.into(),
            labels: v.labels.clone(),
            linux_device: v.linux_device.clone(),
            created: v.created,
        }
    }
}

impl From<&VolumeCreateOpts> for wire::volume::VolumeCreateRequest {
    fn from(o: &VolumeCreateOpts) -> Self {
        Self {
            name: o.name.clone(),
            size: o.size,
            server: o.server,
            location: o.location.as_ref().map(Into::into),
            labels: o.labels.clone(),
            automount: o.automount,
            format: o.format.map(|f| f.to_string()),
        }
    }
}

impl From<&VolumeUpdateOpts> for wire::volume::VolumeUpdateRequest {
    fn from(o: &VolumeUpdateOpts) -> Self {
        Self {
            name: o.name.clone().filter(|n| !n.is_empty()),
            labels: o.labels.clone(),
        }
    }
}

// ── Primary IP ─────────────────────────────────────────────────────

/// IPv4 entries carry a bare address; IPv6 entries carry a CIDR block whose
/// address part is kept as `ip` and whose network is kept as `network`.
fn parse_primary_ip(raw: &str) -> Result<(IpAddr, Option<IpNet>), CoreError> {
    if raw.contains('/') {
        let net = parse_net("primary_ip.ip", raw)?;
        Ok((net.addr(), Some(net.trunc())))
    } else {
        Ok((parse_addr("primary_ip.ip", raw)?, None))
    }
}

fn format_primary_ip(ip: IpAddr, network: Option<IpNet>) -> String {
    match network.and_then(|net| IpNet::new(ip, net.prefix_len()).ok()) {
        Some(net) => net.to_string(),
        None => ip.to_string(),
    }
}

impl TryFrom<wire::PrimaryIp> for PrimaryIp {
    type Error = CoreError;

    fn try_from(p: wire::PrimaryIp) -> Result<Self, Self::Error> {
        let (ip, network) = parse_primary_ip(&p.ip)?;
        Ok(Self {
            id: p.id,
            name: p.name,
            ip,
            network,
            kind: parse_enum::<PrimaryIpType>("primary_ip.type", &p.kind)?,
            labels: p.labels,
            protection: p.protection.into(),
            dns_ptr: p
                .dns_ptr
                .into_iter()
                .map(|entry| -> Result<_, CoreError> {
                    Ok(PrimaryIpDnsPtr {
                        ip: parse_addr("primary_ip.dns_ptr.ip", &entry.ip)?,
                        dns_ptr: entry.dns_ptr,
                    })
                })
                .collect::<Result<_, _>>()?,
            assignee_id: p.assignee_id,
            assignee_type: p.assignee_type,
            auto_delete: p.auto_delete,
            blocked: p.blocked,
            created: p.created,
            datacenter: p.datacenter.into(),
        })
    }
}

impl From<&PrimaryIp> for wire::PrimaryIp {
    fn from(p: &PrimaryIp) -> Self {
        Self {
            id: p.id,
            ip: format_primary_ip(p.ip, p.network),
            labels: p.labels.clone(),
            name: p.name.clone(),
            kind: p.kind.to_string(),
            protection: p.protection.into(),
            dns_ptr: p
                .dns_ptr
                .iter()
                .map(|entry| wire::primary_ip::PrimaryIpDnsPtr {
                    dns_ptr: entry.dns_ptr.clone(),
                    ip: entry.ip.to_string(),
                })
                .collect(),
            assignee_id: p.assignee_id,
            assignee_type: p.assignee_type.clone(),
            auto_delete: p.auto_delete,
            blocked: p.blocked,
            created: p.created,
            datacenter: (&p.datacenter).into(),
        }
    }
}

impl From<&PrimaryIpCreateOpts> for wire::primary_ip::PrimaryIpCreateRequest {
    fn from(o: &PrimaryIpCreateOpts) -> Self {
        Self {
            name: o.name.clone(),
            kind: o.kind.to_string(),
            assignee_type: o.assignee_type.clone(),
            assignee_id: o.assignee_id,
            labels: o.labels.clone(),
            auto_delete: o.auto_delete,
            datacenter: o.datacenter.clone().filter(|dc| !dc.is_empty()),
        }
    }
}

impl From<&PrimaryIpUpdateOpts> for wire::primary_ip::PrimaryIpUpdateRequest {
    fn from(o: &PrimaryIpUpdateOpts) -> Self {
        Self {
            name: o.name.clone().filter(|n| !n.is_empty()),
            labels: o.labels.clone(),
            auto_delete: o.auto_delete,
        }
    }
}
