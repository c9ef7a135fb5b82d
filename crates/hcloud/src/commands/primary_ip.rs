//! Primary IP command handlers.

use std::net::IpAddr;

use tabled::Tabled;

use hcloud_core::{
    PrimaryIp, PrimaryIpAssignOpts, PrimaryIpChangeDnsPtrOpts, PrimaryIpChangeProtectionOpts,
    PrimaryIpCreateOpts, PrimaryIpListOpts, PrimaryIpType, PrimaryIpUpdateOpts,
};

use crate::cli::{GlobalOpts, PrimaryIpArgs, PrimaryIpCommand, PrimaryIpTypeArg};
use crate::error::CliError;
use crate::output;

use super::{Session, action, util};

const LIST_COMMAND: &str = "primary-ip list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PrimaryIpRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Datacenter")]
    datacenter: String,
}

impl From<&PrimaryIp> for PrimaryIpRow {
    fn from(p: &PrimaryIp) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            kind: p.kind.to_string(),
            ip: display_ip(p),
            assignee: util::or_dash(p.assignee_id),
            datacenter: p.datacenter.name.clone(),
        }
    }
}

/// IPv6 blocks show as their network, single addresses as-is.
fn display_ip(p: &PrimaryIp) -> String {
    p.network.map_or_else(|| p.ip.to_string(), |net| net.to_string())
}

fn detail(p: &PrimaryIp) -> String {
    let ptrs = p
        .dns_ptr
        .iter()
        .map(|d| format!("  - {} -> {}", d.ip, d.dns_ptr))
        .collect::<Vec<_>>()
        .join("\n");
    [
        format!("ID:          {}", p.id),
        format!("Name:        {}", p.name),
        format!("Type:        {}", p.kind),
        format!("IP:          {}", display_ip(p)),
        format!(
            "Assignee:    {}",
            p.assignee_id
                .map_or_else(|| "-".into(), |id| format!("{} {id}", p.assignee_type))
        ),
        format!("Auto delete: {}", p.auto_delete),
        format!("Blocked:     {}", p.blocked),
        format!("Protected:   {}", p.protection.delete),
        format!("Datacenter:  {}", p.datacenter.name),
        format!("Labels:      {}", util::fmt_labels(&p.labels)),
        format!("Created:     {}", p.created),
        format!("Reverse DNS:\n{ptrs}"),
    ]
    .join("\n")
}

fn kind_arg(arg: PrimaryIpTypeArg) -> PrimaryIpType {
    match arg {
        PrimaryIpTypeArg::Ipv4 => PrimaryIpType::Ipv4,
        PrimaryIpTypeArg::Ipv6 => PrimaryIpType::Ipv6,
    }
}

fn parse_ip(raw: &str) -> Result<IpAddr, CliError> {
    raw.parse().map_err(|e| CliError::Validation {
        field: "ip".into(),
        reason: format!("'{raw}': {e}"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: PrimaryIpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let primary_ips = session.client.primary_ips();
    match args.command {
        PrimaryIpCommand::List { list, name, ip } => {
            let opts = PrimaryIpListOpts {
                name,
                ip,
                sort: list.sort.clone(),
                ..PrimaryIpListOpts::default()
            };
            let items = util::fetch(&primary_ips, &list, opts).await?;
            let out = output::render_list(
                &global.output,
                &items,
                |p| PrimaryIpRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrimaryIpCommand::Get { primary_ip } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let out = output::render_single(&global.output, &p, detail, display_ip)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrimaryIpCommand::Create {
            name,
            kind,
            datacenter,
            assignee_id,
            auto_delete,
            labels,
            wait,
        } => {
            let opts = PrimaryIpCreateOpts {
                assignee_id,
                datacenter,
                auto_delete,
                labels: util::create_labels(&labels)?,
                ..PrimaryIpCreateOpts::new(name, kind_arg(kind))
            };
            let (result, _) = primary_ips.create(&opts).await?;
            let out =
                output::render_single(&global.output, &result.primary_ip, detail, display_ip)?;
            output::print_output(&out, global.quiet);
            action::finish(session, result.action.into_iter().collect(), &wait, global).await
        }

        PrimaryIpCommand::Update {
            primary_ip,
            name,
            labels,
            clear_labels,
            auto_delete,
        } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let opts = PrimaryIpUpdateOpts {
                name,
                labels: util::update_labels(&labels, clear_labels)?,
                auto_delete,
            };
            let (updated, _) = primary_ips.update(&p, &opts).await?;
            let out = output::render_single(&global.output, &updated, detail, display_ip)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrimaryIpCommand::Delete { primary_ip } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let prompt = format!("Delete primary IP {} ({})?", p.name, display_ip(&p));
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            primary_ips.delete(&p).await?;
            if !global.quiet {
                eprintln!("Primary IP {} deleted", p.id);
            }
            Ok(())
        }

        PrimaryIpCommand::Assign {
            primary_ip,
            server,
            wait,
        } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let (started, _) = primary_ips
                .assign(&p, &PrimaryIpAssignOpts::server(server))
                .await?;
            action::finish(session, vec![started], &wait, global).await
        }

        PrimaryIpCommand::Unassign { primary_ip, wait } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let (started, _) = primary_ips.unassign(&p).await?;
            action::finish(session, vec![started], &wait, global).await
        }

        PrimaryIpCommand::SetRdns {
            primary_ip,
            ip,
            hostname,
            wait,
        } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let ip = match ip {
                Some(ref raw) => parse_ip(raw)?,
                None => p.ip,
            };
            let opts = PrimaryIpChangeDnsPtrOpts {
                ip,
                dns_ptr: hostname,
            };
            let (started, _) = primary_ips.change_dns_ptr(&p, &opts).await?;
            action::finish(session, vec![started], &wait, global).await
        }

        PrimaryIpCommand::Protect {
            primary_ip,
            delete,
            wait,
        } => {
            let p = util::require(&primary_ips, &primary_ip, LIST_COMMAND).await?;
            let opts = PrimaryIpChangeProtectionOpts {
                delete: Some(delete),
            };
            let (started, _) = primary_ips.change_protection(&p, &opts).await?;
            action::finish(session, vec![started], &wait, global).await
        }
    }
}
