//! Action command handlers and the wait loop shared by mutating commands.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use hcloud_core::{Action, ActionListOpts, ActionStatus, Client};

use crate::cli::{ActionArgs, ActionCommand, ActionStatusArg, GlobalOpts, WaitArgs};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Finished")]
    finished: String,
}

impl ActionRow {
    fn new(a: &Action, color: bool) -> Self {
        Self {
            id: a.id,
            command: a.command.clone(),
            status: output::action_status(a.status, color),
            progress: format!("{}%", a.progress),
            started: a.started.format("%Y-%m-%d %H:%M:%S").to_string(),
            finished: util::or_dash(a.finished.map(|f| f.format("%Y-%m-%d %H:%M:%S"))),
        }
    }
}

fn detail(a: &Action) -> String {
    let resources = a
        .resources
        .iter()
        .map(|r| format!("  - {} {}", r.kind, r.id))
        .collect::<Vec<_>>()
        .join("\n");
    let mut lines = vec![
        format!("ID:        {}", a.id),
        format!("Command:   {}", a.command),
        format!("Status:    {}", a.status),
        format!("Progress:  {}%", a.progress),
        format!("Started:   {}", a.started),
        format!("Finished:  {}", util::or_dash(a.finished)),
    ];
    if let Some(err) = a.failure() {
        lines.push(format!("Error:     {} ({})", err.message, err.code));
    }
    lines.push(format!("Resources:\n{resources}"));
    lines.join("\n")
}

fn status_filter(arg: ActionStatusArg) -> ActionStatus {
    match arg {
        ActionStatusArg::Running => ActionStatus::Running,
        ActionStatusArg::Success => ActionStatus::Success,
        ActionStatusArg::Error => ActionStatus::Error,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: ActionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let actions = session.client.actions();
    match args.command {
        ActionCommand::List { list, status, id } => {
            let opts = ActionListOpts {
                id,
                status: status.into_iter().map(status_filter).collect(),
                sort: list.sort.clone(),
                ..ActionListOpts::default()
            };
            let items = util::fetch(&actions, &list, opts).await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &items,
                |a| ActionRow::new(a, color),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ActionCommand::Get { id } => {
            let (action, _) = actions.get_by_id(id).await?;
            let action = action
                .ok_or_else(|| CliError::not_found("action", &id.to_string(), "action list"))?;
            let out = output::render_single(&global.output, &action, detail, |a| {
                a.status.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ActionCommand::Wait { ids } => {
            let mut pending = Vec::with_capacity(ids.len());
            for id in ids {
                let (action, _) = actions.get_by_id(id).await?;
                pending.push(action.ok_or_else(|| {
                    CliError::not_found("action", &id.to_string(), "action list")
                })?);
            }
            let done =
                wait_for(&session.client, pending, session.poll_interval, global.quiet).await?;
            print_actions(&done, global)
        }
    }
}

// ── Waiting ─────────────────────────────────────────────────────────

/// Report actions started by a mutating command, waiting first if asked.
pub async fn finish(
    session: &Session,
    actions: Vec<Action>,
    wait: &WaitArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if actions.is_empty() {
        return Ok(());
    }
    if wait.wait {
        let done = wait_for(&session.client, actions, session.poll_interval, global.quiet).await?;
        if !global.quiet {
            for a in &done {
                eprintln!("Action {} ({}) finished", a.id, a.command);
            }
        }
    } else if !global.quiet {
        for a in &actions {
            eprintln!("Started action {} ({})", a.id, a.command);
        }
    }
    Ok(())
}

fn print_actions(actions: &[Action], global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        actions,
        |a| ActionRow::new(a, color),
        |a| a.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Poll until every action is terminal.
///
/// Returns the final snapshots, or the first failure once all are done.
pub async fn wait_for(
    client: &Client,
    mut actions: Vec<Action>,
    poll_interval: Duration,
    quiet: bool,
) -> Result<Vec<Action>, CliError> {
    let progress = spinner(quiet);
    let cancel = client.cancellation_token().clone();
    let action_client = client.actions();

    loop {
        for action in actions.iter_mut().filter(|a| !a.is_terminal()) {
            let (fresh, _) = action_client.refresh(action).await?;
            *action = fresh;
        }

        let running: Vec<&Action> = actions.iter().filter(|a| !a.is_terminal()).collect();
        if running.is_empty() {
            break;
        }
        let summary = running
            .iter()
            .map(|a| format!("{} {}%", a.command, a.progress))
            .collect::<Vec<_>>()
            .join(", ");
        progress.set_message(summary);
        tracing::trace!(running = running.len(), "waiting on actions");

        tokio::select! {
            () = cancel.cancelled() => {
                progress.finish_and_clear();
                return Err(CliError::Cancelled);
            }
            () = tokio::time::sleep(poll_interval) => {}
        }
    }
    progress.finish_and_clear();

    if let Some(failed) = actions.iter().find(|a| a.status == ActionStatus::Error) {
        let message = failed
            .failure()
            .map_or_else(|| "unknown error".into(), |e| format!("{} ({})", e.message, e.code));
        return Err(CliError::ActionFailed {
            id: failed.id,
            command: failed.command.clone(),
            message,
        });
    }
    Ok(actions)
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
