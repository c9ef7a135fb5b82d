//! Firewall command handlers.

use std::str::FromStr;

use ipnet::IpNet;
use tabled::Tabled;

use hcloud_core::{
    Firewall, FirewallCreateOpts, FirewallListOpts, FirewallResource, FirewallRule,
    FirewallRuleDirection, FirewallRuleProtocol, FirewallSetRulesOpts, FirewallUpdateOpts,
};

use crate::cli::{
    FirewallArgs, FirewallCommand, FirewallRuleArgs, FirewallTargetArgs, GlobalOpts,
};
use crate::error::CliError;
use crate::output;

use super::{Session, action, util};

const LIST_COMMAND: &str = "firewall list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FirewallRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rules")]
    rules: usize,
    #[tabled(rename = "Applied To")]
    applied_to: usize,
    #[tabled(rename = "Labels")]
    labels: String,
}

impl From<&Firewall> for FirewallRow {
    fn from(f: &Firewall) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            rules: f.rules.len(),
            applied_to: f.applied_to.len(),
            labels: util::fmt_labels(&f.labels),
        }
    }
}

fn fmt_rule(r: &FirewallRule) -> String {
    let peers = match r.direction {
        FirewallRuleDirection::In => &r.source_ips,
        FirewallRuleDirection::Out => &r.destination_ips,
    };
    let peers = peers.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
    let mut line = format!("  - {} {}", r.direction, r.protocol);
    if let Some(ref port) = r.port {
        line.push_str(&format!(" port {port}"));
    }
    if !peers.is_empty() {
        line.push_str(&format!(" [{peers}]"));
    }
    if let Some(ref desc) = r.description {
        line.push_str(&format!(" ({desc})"));
    }
    line
}

fn fmt_resource(r: &FirewallResource) -> String {
    match r {
        FirewallResource::Server { id } => format!("  - server {id}"),
        FirewallResource::LabelSelector { selector } => format!("  - label selector {selector}"),
    }
}

fn detail(f: &Firewall) -> String {
    let rules = f.rules.iter().map(fmt_rule).collect::<Vec<_>>().join("\n");
    let applied = f.applied_to.iter().map(fmt_resource).collect::<Vec<_>>().join("\n");
    [
        format!("ID:         {}", f.id),
        format!("Name:       {}", f.name),
        format!("Labels:     {}", util::fmt_labels(&f.labels)),
        format!("Created:    {}", f.created),
        format!("Rules:\n{rules}"),
        format!("Applied To:\n{applied}"),
    ]
    .join("\n")
}

// ── Argument parsing ────────────────────────────────────────────────

/// Parse `DIRECTION:PROTOCOL[:PORT[:CIDR,...]]`.
///
/// CIDRs become source addresses for inbound rules and destination
/// addresses for outbound ones. An empty port segment means no port.
pub fn parse_rule(spec: &str) -> Result<FirewallRule, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "rule".into(),
        reason: format!("{reason} in '{spec}'"),
    };

    let mut parts = spec.splitn(4, ':');
    let direction = parts.next().unwrap_or_default();
    let direction = FirewallRuleDirection::from_str(direction)
        .map_err(|_| invalid(format!("unknown direction '{direction}'")))?;
    let protocol = parts.next().unwrap_or_default();
    let protocol = FirewallRuleProtocol::from_str(protocol)
        .map_err(|_| invalid(format!("unknown protocol '{protocol}'")))?;

    let mut rule = match direction {
        FirewallRuleDirection::In => FirewallRule::inbound(protocol),
        FirewallRuleDirection::Out => FirewallRule::outbound(protocol),
    };
    if let Some(port) = parts.next().filter(|p| !p.is_empty()) {
        rule = rule.with_port(port);
    }
    if let Some(cidrs) = parts.next().filter(|c| !c.is_empty()) {
        let nets = cidrs
            .split(',')
            .map(|c| IpNet::from_str(c.trim()).map_err(|e| invalid(format!("bad CIDR '{c}': {e}"))))
            .collect::<Result<Vec<_>, _>>()?;
        match direction {
            FirewallRuleDirection::In => rule.source_ips = nets,
            FirewallRuleDirection::Out => rule.destination_ips = nets,
        }
    }
    Ok(rule)
}

fn collect_rules(args: &FirewallRuleArgs) -> Result<Vec<FirewallRule>, CliError> {
    if let Some(ref path) = args.rules_file {
        return util::read_json_file(path);
    }
    args.rules.iter().map(|s| parse_rule(s)).collect()
}

fn collect_targets(args: &FirewallTargetArgs) -> Vec<FirewallResource> {
    let servers = args.servers.iter().map(|&id| FirewallResource::Server { id });
    let selectors = args
        .selectors
        .iter()
        .map(|s| FirewallResource::LabelSelector { selector: s.clone() });
    servers.chain(selectors).collect()
}

fn require_targets(args: &FirewallTargetArgs) -> Result<Vec<FirewallResource>, CliError> {
    let targets = collect_targets(args);
    if targets.is_empty() {
        return Err(CliError::Validation {
            field: "target".into(),
            reason: "give at least one --server or --label-selector".into(),
        });
    }
    Ok(targets)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: FirewallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let firewalls = session.client.firewalls();
    match args.command {
        FirewallCommand::List { list, name } => {
            let opts = FirewallListOpts {
                name,
                sort: list.sort.clone(),
                ..FirewallListOpts::default()
            };
            let items = util::fetch(&firewalls, &list, opts).await?;
            let out = output::render_list(
                &global.output,
                &items,
                |f| FirewallRow::from(f),
                |f| f.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FirewallCommand::Get { firewall } => {
            let fw = util::require(&firewalls, &firewall, LIST_COMMAND).await?;
            let out = output::render_single(&global.output, &fw, detail, |f| f.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FirewallCommand::Create {
            name,
            labels,
            rules,
            apply_to,
            wait,
        } => {
            let opts = FirewallCreateOpts {
                name,
                labels: util::create_labels(&labels)?,
                rules: collect_rules(&rules)?,
                apply_to: collect_targets(&apply_to),
            };
            let (result, _) = firewalls.create(&opts).await?;
            let out = output::render_single(&global.output, &result.firewall, detail, |f| {
                f.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            action::finish(session, result.actions, &wait, global).await
        }

        FirewallCommand::Update {
            firewall,
            name,
            labels,
            clear_labels,
        } => {
            let fw = util::require(&firewalls, &firewall, LIST_COMMAND).await?;
            let opts = FirewallUpdateOpts {
                name,
                labels: util::update_labels(&labels, clear_labels)?,
            };
            let (updated, _) = firewalls.update(&fw, &opts).await?;
            let out = output::render_single(&global.output, &updated, detail, |f| {
                f.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FirewallCommand::Delete { firewall } => {
            let fw = util::require(&firewalls, &firewall, LIST_COMMAND).await?;
            if !util::confirm(&format!("Delete firewall {} ({})?", fw.name, fw.id), global.yes)? {
                return Ok(());
            }
            firewalls.delete(&fw).await?;
            if !global.quiet {
                eprintln!("Firewall {} deleted", fw.id);
            }
            Ok(())
        }

        FirewallCommand::SetRules {
            firewall,
            rules,
            wait,
        } => {
            let fw = util::require(&firewalls, &firewall, LIST_COMMAND).await?;
            let opts = FirewallSetRulesOpts {
                rules: collect_rules(&rules)?,
            };
            let (actions, _) = firewalls.set_rules(&fw, &opts).await?;
            action::finish(session, actions, &wait, global).await
        }

        FirewallCommand::ApplyTo {
            firewall,
            targets,
            wait,
        } => {
            let fw = util::require(&firewalls, &firewall, LIST_COMMAND).await?;
            let targets = require_targets(&targets)?;
            let (actions, _) = firewalls.apply_resources(&fw, &targets).await?;
            action::finish(session, actions, &wait, global).await
        }

        FirewallCommand::RemoveFrom {
            firewall,
            targets,
            wait,
        } => {
            let fw = util::require(&firewalls, &firewall, LIST_COMMAND).await?;
            let targets = require_targets(&targets)?;
            let (actions, _) = firewalls.remove_resources(&fw, &targets).await?;
            action::finish(session, actions, &wait, global).await
        }
    }
}
