//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use hcloud_config::ConfigError;
use hcloud_core::{ApiError, CoreError, ErrorCode};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API")]
    #[diagnostic(
        code(hcloud::connection_failed),
        help("Check network access and the endpoint of the active profile.")
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(hcloud::timeout),
        help("Increase the timeout with --timeout or retry later.")
    )]
    Timeout,

    #[error("Interrupted")]
    #[diagnostic(code(hcloud::cancelled))]
    Cancelled,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hcloud::auth_failed),
        help("Verify the API token of profile '{profile}' has access to this project.")
    )]
    AuthFailed { profile: String, message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(hcloud::no_credentials),
        help(
            "Configure a profile with: hcloud config init\n\
             Or set the HCLOUD_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hcloud::not_found),
        help("Run: hcloud {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{matches} {resource_type}s are named '{name}'")]
    #[diagnostic(
        code(hcloud::ambiguous_name),
        help("Use the numeric ID instead of the name.")
    )]
    AmbiguousName {
        resource_type: String,
        name: String,
        matches: usize,
    },

    #[error("Conflict ({code}): {message}")]
    #[diagnostic(code(hcloud::conflict))]
    Conflict { code: String, message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(hcloud::api_error))]
    ApiError { code: String, message: String },

    #[error("Action {id} ({command}) failed: {message}")]
    #[diagnostic(code(hcloud::action_failed))]
    ActionFailed {
        id: i64,
        command: String,
        message: String,
    },

    #[error("Unexpected API payload: {message}")]
    #[diagnostic(code(hcloud::malformed))]
    Malformed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hcloud::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hcloud::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hcloud config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(hcloud::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(hcloud::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(hcloud::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } | Self::AmbiguousName { .. } => exit_code::CONFLICT,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: &str, list_command: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::MalformedData { field, reason } => Self::Malformed {
                message: format!("{field}: {reason}"),
            },
            CoreError::AmbiguousName {
                kind,
                name,
                matches,
            } => Self::AmbiguousName {
                resource_type: kind.into(),
                name,
                matches,
            },
            CoreError::Cancelled => Self::Cancelled,
            CoreError::Api(api) => Self::from(api),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(ref e) if e.is_timeout() => Self::Timeout,
            ApiError::Transport(_) => Self::ConnectionFailed { source: err },
            ApiError::Api { code, message, .. } => match code {
                ErrorCode::Unauthorized | ErrorCode::Forbidden => Self::AuthFailed {
                    profile: "current".into(),
                    message,
                },
                ErrorCode::Timeout => Self::Timeout,
                ErrorCode::Conflict
                | ErrorCode::UniquenessError
                | ErrorCode::Locked
                | ErrorCode::Protected => Self::Conflict {
                    code: code.to_string(),
                    message,
                },
                other => Self::ApiError {
                    code: other.to_string(),
                    message,
                },
            },
            other => Self::ApiError {
                code: "client".into(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: ErrorCode) -> CoreError {
        CoreError::Api(ApiError::Api {
            status: 409,
            code,
            message: "boom".into(),
            details: None,
        })
    }

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::from(api(ErrorCode::Unauthorized)).exit_code(), 3);
        assert_eq!(CliError::from(api(ErrorCode::UniquenessError)).exit_code(), 6);
        assert_eq!(CliError::from(api(ErrorCode::Timeout)).exit_code(), 8);
        assert_eq!(CliError::from(api(ErrorCode::ServiceError)).exit_code(), 1);
    }

    #[test]
    fn ambiguity_is_a_conflict() {
        let err = CliError::from(CoreError::AmbiguousName {
            kind: "volume",
            name: "data".into(),
            matches: 2,
        });
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
        assert_eq!(err.to_string(), "2 volumes are named 'data'");
    }

    #[test]
    fn local_validation_is_usage_error() {
        let err = CliError::from(CoreError::Validation {
            message: "missing name".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn unknown_profile_lists_available() {
        let err = CliError::from(ConfigError::UnknownProfile {
            name: "staging".into(),
            available: vec!["lab".into(), "prod".into()],
        });
        match err {
            CliError::ProfileNotFound { available, .. } => assert_eq!(available, "lab, prod"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
