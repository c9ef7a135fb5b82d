mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use hcloud_core::Client;

use crate::cli::{Cli, Command, OutputFormat};
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments, remembering whether --output was explicit
    let matches = Cli::command().get_matches();
    let mut cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    let output_is_default = matches.value_source("output") == Some(ValueSource::DefaultValue);

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    let cfg = config::load_config_or_default();
    if output_is_default {
        if let Ok(format) = OutputFormat::from_str(&cfg.defaults.output, true) {
            cli.global.output = format;
        }
    }

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli, &cfg).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, cfg: &config::Config) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need an API connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "hcloud", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a client
        cmd => {
            let settings = config::resolve(&cli.global, cfg)?;
            let cancel = CancellationToken::new();
            let client = Client::from_config(&settings.client)?.with_cancellation(cancel.clone());

            // Ctrl-C cancels in-flight requests and action waits
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });

            let session = Session {
                client,
                poll_interval: settings.poll_interval,
            };
            tracing::debug!(
                command = ?cmd,
                endpoint = %settings.client.endpoint,
                "dispatching command"
            );
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}
