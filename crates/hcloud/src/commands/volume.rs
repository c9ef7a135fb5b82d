//! Volume command handlers.

use tabled::Tabled;

use hcloud_core::{
    LocationRef, Volume, VolumeAttachOpts, VolumeChangeProtectionOpts, VolumeCreateOpts,
    VolumeFormat, VolumeListOpts, VolumeStatus, VolumeUpdateOpts,
};

use crate::cli::{GlobalOpts, VolumeArgs, VolumeCommand, VolumeFormatArg, VolumeStatusArg};
use crate::error::CliError;
use crate::output;

use super::{Session, action, util};

const LIST_COMMAND: &str = "volume list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VolumeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&Volume> for VolumeRow {
    fn from(v: &Volume) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            size: format!("{} GB", v.size),
            status: v.status.to_string(),
            server: util::or_dash(v.server),
            location: v.location.name.clone(),
        }
    }
}

fn detail(v: &Volume) -> String {
    [
        format!("ID:           {}", v.id),
        format!("Name:         {}", v.name),
        format!("Size:         {} GB", v.size),
        format!("Status:       {}", v.status),
        format!("Server:       {}", util::or_dash(v.server)),
        format!("Location:     {}", v.location.name),
        format!("Format:       {}", util::or_dash(v.format.as_deref())),
        format!("Linux device: {}", util::or_dash(v.linux_device.as_deref())),
        format!("Protected:    {}", v.protection.delete),
        format!("Labels:       {}", util::fmt_labels(&v.labels)),
        format!("Created:      {}", v.created),
    ]
    .join("\n")
}

fn status_filter(arg: VolumeStatusArg) -> VolumeStatus {
    match arg {
        VolumeStatusArg::Creating => VolumeStatus::Creating,
        VolumeStatusArg::Available => VolumeStatus::Available,
    }
}

fn format_arg(arg: VolumeFormatArg) -> VolumeFormat {
    match arg {
        VolumeFormatArg::Ext4 => VolumeFormat::Ext4,
        VolumeFormatArg::Xfs => VolumeFormat::Xfs,
    }
}

/// Numeric locations are IDs, anything else is a name.
fn location_ref(raw: &str) -> LocationRef {
    raw.parse::<i64>()
        .map_or_else(|_| LocationRef::from(raw), LocationRef::from)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: VolumeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let volumes = session.client.volumes();
    match args.command {
        VolumeCommand::List { list, name, status } => {
            let opts = VolumeListOpts {
                name,
                status: status.into_iter().map(status_filter).collect(),
                sort: list.sort.clone(),
                ..VolumeListOpts::default()
            };
            let items = util::fetch(&volumes, &list, opts).await?;
            let out = output::render_list(
                &global.output,
                &items,
                |v| VolumeRow::from(v),
                |v| v.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VolumeCommand::Get { volume } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            let out = output::render_single(&global.output, &v, detail, |v| v.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VolumeCommand::Create {
            name,
            size,
            server,
            location,
            automount,
            format,
            labels,
            wait,
        } => {
            let opts = VolumeCreateOpts {
                name,
                size,
                server,
                location: location.as_deref().map(location_ref),
                labels: util::create_labels(&labels)?,
                automount: automount.then_some(true),
                format: format.map(format_arg),
            };
            let (result, _) = volumes.create(&opts).await?;
            let out = output::render_single(&global.output, &result.volume, detail, |v| {
                v.id.to_string()
            })?;
            output::print_output(&out, global.quiet);

            let actions = result.action.into_iter().chain(result.next_actions).collect();
            action::finish(session, actions, &wait, global).await
        }

        VolumeCommand::Update {
            volume,
            name,
            labels,
            clear_labels,
        } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            let opts = VolumeUpdateOpts {
                name,
                labels: util::update_labels(&labels, clear_labels)?,
            };
            let (updated, _) = volumes.update(&v, &opts).await?;
            let out = output::render_single(&global.output, &updated, detail, |v| {
                v.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VolumeCommand::Delete { volume } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            if !util::confirm(&format!("Delete volume {} ({})?", v.name, v.id), global.yes)? {
                return Ok(());
            }
            volumes.delete(&v).await?;
            if !global.quiet {
                eprintln!("Volume {} deleted", v.id);
            }
            Ok(())
        }

        VolumeCommand::Attach {
            volume,
            server,
            automount,
            wait,
        } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            let opts = VolumeAttachOpts { server, automount };
            let (started, _) = volumes.attach_with_opts(&v, &opts).await?;
            action::finish(session, vec![started], &wait, global).await
        }

        VolumeCommand::Detach { volume, wait } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            let (started, _) = volumes.detach(&v).await?;
            action::finish(session, vec![started], &wait, global).await
        }

        VolumeCommand::Resize { volume, size, wait } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            let (started, _) = volumes.resize(&v, size).await?;
            action::finish(session, vec![started], &wait, global).await
        }

        VolumeCommand::Protect {
            volume,
            delete,
            wait,
        } => {
            let v = util::require(&volumes, &volume, LIST_COMMAND).await?;
            let opts = VolumeChangeProtectionOpts {
                delete: Some(delete),
            };
            let (started, _) = volumes.change_protection(&v, &opts).await?;
            action::finish(session, vec![started], &wait, global).await
        }
    }
}
