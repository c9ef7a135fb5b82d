//! Command dispatch: bridges CLI args -> resource clients -> output formatting.

pub mod action;
pub mod config_cmd;
pub mod firewall;
pub mod primary_ip;
pub mod util;
pub mod volume;

use std::time::Duration;

use hcloud_core::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// An API client plus the settings that shape how commands wait on it.
pub struct Session {
    pub client: Client,
    pub poll_interval: Duration,
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Firewall(args) => firewall::handle(session, args, global).await,
        Command::Volume(args) => volume::handle(session, args, global).await,
        Command::PrimaryIp(args) => primary_ip::handle(session, args, global).await,
        Command::Action(args) => action::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
