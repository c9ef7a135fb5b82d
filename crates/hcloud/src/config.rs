//! CLI configuration: thin wrapper around `hcloud_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--endpoint, --token, --timeout, --poll-interval).

use std::time::Duration;

use secrecy::SecretString;

use hcloud_core::{ClientConfig, DEFAULT_ENDPOINT};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use hcloud_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Lower bound for the action poll interval; `0` would spin on the API.
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Everything a resource command needs beyond its own arguments.
#[derive(Debug)]
pub struct Settings {
    pub client: ClientConfig,
    pub poll_interval: Duration,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Merge the config file, the active profile and global flags.
///
/// A profile named with `--profile` must exist; the implicit default may
/// be absent as long as flags or `HCLOUD_TOKEN` supply a token.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Settings, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = if global.profile.is_some() {
        config.profile(&profile_name)?.clone()
    } else {
        config.profiles.get(&profile_name).cloned().unwrap_or_default()
    };

    // flag > profile > public endpoint
    let endpoint = global
        .endpoint
        .as_deref()
        .or(profile.endpoint.as_deref())
        .unwrap_or(DEFAULT_ENDPOINT);
    let endpoint = hcloud_config::parse_endpoint(endpoint)?;

    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => hcloud_config::resolve_token(&profile, &profile_name)?,
    };

    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);
    let poll_interval = global
        .poll_interval
        .unwrap_or(config.defaults.poll_interval_ms)
        .max(MIN_POLL_INTERVAL_MS);

    Ok(Settings {
        client: ClientConfig {
            endpoint,
            token,
            timeout: Duration::from_secs(timeout),
            user_agent: Some(concat!("hcloud-cli/", env!("CARGO_PKG_VERSION")).into()),
        },
        poll_interval: Duration::from_millis(poll_interval),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["hcloud"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["action", "get", "1"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_lab() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                endpoint: Some("http://127.0.0.1:9000/v1".into()),
                token: Some("lab-token".into()),
                timeout: Some(7),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let g = global(&[
            "--profile",
            "lab",
            "--endpoint",
            "http://localhost:1/v1",
            "--token",
            "flag-token",
            "--timeout",
            "3",
        ]);
        let settings = resolve(&g, &config_with_lab()).unwrap();

        assert_eq!(settings.client.endpoint.as_str(), "http://localhost:1/v1");
        assert_eq!(settings.client.token.expose_secret(), "flag-token");
        assert_eq!(settings.client.timeout, Duration::from_secs(3));
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let g = global(&["--profile", "lab", "--poll-interval", "50"]);
        let settings = resolve(&g, &config_with_lab()).unwrap();

        assert_eq!(settings.client.endpoint.as_str(), "http://127.0.0.1:9000/v1");
        assert_eq!(settings.client.timeout, Duration::from_secs(7));
        assert_eq!(settings.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let g = global(&["--profile", "lab", "--poll-interval", "0"]);
        let settings = resolve(&g, &config_with_lab()).unwrap();
        assert_eq!(settings.poll_interval, Duration::from_millis(MIN_POLL_INTERVAL_MS));

        let mut config = config_with_lab();
        config.defaults.poll_interval_ms = 0;
        let settings = resolve(&global(&["--profile", "lab"]), &config).unwrap();
        assert_eq!(settings.poll_interval, Duration::from_millis(MIN_POLL_INTERVAL_MS));
    }

    #[test]
    fn explicit_unknown_profile_is_error() {
        let g = global(&["--profile", "nope", "--token", "t"]);
        let err = resolve(&g, &config_with_lab()).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { .. }));
    }

    #[test]
    fn missing_default_profile_uses_flags() {
        let g = global(&["--token", "t"]);
        let settings = resolve(&g, &Config::default()).unwrap();
        assert_eq!(settings.client.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(settings.client.timeout, Duration::from_secs(30));
    }
}
