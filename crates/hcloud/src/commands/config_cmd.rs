//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use hcloud_config::TOKEN_ENV;
use hcloud_core::DEFAULT_ENDPOINT;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const VALID_KEYS: &str = "default_profile, defaults.output, defaults.timeout, \
     defaults.poll_interval_ms, profiles.<name>.endpoint, profiles.<name>.token, \
     profiles.<name>.token_env, profiles.<name>.timeout";

// ── Helpers ─────────────────────────────────────────────────────────

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_number(field: &str, value: &str) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be a non-negative number, got '{value}'"),
    })
}

fn unknown_key(key: &str) -> CliError {
    CliError::Validation {
        field: key.into(),
        reason: format!("unknown config key. Valid keys: {VALID_KEYS}"),
    }
}

/// Apply a dotted `key = value` assignment. Profiles are created on demand.
fn apply_setting(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["default_profile"] => cfg.default_profile = Some(value.into()),
        ["defaults", "output"] => {
            if !matches!(value, "table" | "json" | "json-compact" | "yaml" | "plain") {
                return Err(CliError::Validation {
                    field: key.into(),
                    reason: "must be one of table, json, json-compact, yaml, plain".into(),
                });
            }
            cfg.defaults.output = value.into();
        }
        ["defaults", "timeout"] => cfg.defaults.timeout = parse_number(key, value)?,
        ["defaults", "poll_interval_ms"] => {
            cfg.defaults.poll_interval_ms = parse_number(key, value)?;
        }
        ["profiles", name, field] if !name.is_empty() => {
            let mut profile = cfg.profiles.get(*name).cloned().unwrap_or_default();
            match *field {
                "endpoint" => {
                    hcloud_config::parse_endpoint(value)?;
                    profile.endpoint = Some(value.into());
                }
                "token" => profile.token = Some(value.into()),
                "token_env" => profile.token_env = Some(value.into()),
                "timeout" => profile.timeout = Some(parse_number(key, value)?),
                _ => return Err(unknown_key(key)),
            }
            cfg.profiles.insert((*name).to_owned(), profile);
        }
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn describe(cfg: &Config) -> String {
    let mut lines = vec![
        format!(
            "Default profile:   {}",
            cfg.default_profile.as_deref().unwrap_or("default")
        ),
        format!("Output:            {}", cfg.defaults.output),
        format!("Timeout:           {}s", cfg.defaults.timeout),
        format!("Poll interval:     {}ms", cfg.defaults.poll_interval_ms),
    ];
    for (name, p) in &cfg.profiles {
        lines.push(format!("\n[{name}]"));
        lines.push(format!(
            "  endpoint:  {}",
            p.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
        ));
        if let Some(ref env) = p.token_env {
            lines.push(format!("  token_env: {env}"));
        }
        if let Some(ref token) = p.token {
            lines.push(format!("  token:     {token}"));
        }
        if let Some(timeout) = p.timeout {
            lines.push(format!("  timeout:   {timeout}s"));
        }
    }
    lines.join("\n")
}

fn init_wizard() -> Result<(String, Profile), CliError> {
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let endpoint: String = Input::new()
        .with_prompt("API endpoint")
        .default(DEFAULT_ENDPOINT.into())
        .interact_text()
        .map_err(prompt_err)?;
    hcloud_config::parse_endpoint(&endpoint)?;

    let choices = &[
        "Read token from an environment variable (recommended)",
        "Save token to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("How should the API token be supplied?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        endpoint: (endpoint != DEFAULT_ENDPOINT).then_some(endpoint),
        ..Profile::default()
    };
    if selection == 0 {
        let var: String = Input::new()
            .with_prompt("Environment variable")
            .default(TOKEN_ENV.into())
            .interact_text()
            .map_err(prompt_err)?;
        profile.token_env = Some(var);
    } else {
        let token = Password::new()
            .with_prompt("API token")
            .interact()
            .map_err(prompt_err)?;
        if token.is_empty() {
            return Err(CliError::Validation {
                field: "token".into(),
                reason: "API token cannot be empty".into(),
            });
        }
        profile.token = Some(token);
    }
    Ok((profile_name, profile))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            eprintln!("hcloud configuration wizard");
            eprintln!("  Config path: {}\n", config::config_path().display());

            let (profile_name, profile) = init_wizard()?;
            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: hcloud firewall list");
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default().redacted();
            let out = output::render_single(&global.output, &cfg, describe, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            apply_setting(&mut cfg, &key, &value)?;
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Set {key}");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: hcloud config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if *name == active { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
