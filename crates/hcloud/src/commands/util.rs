//! Shared helpers for command handlers.

use std::path::Path;

use hcloud_core::{Labels, ListOpts, ListQuery, ManagedKind, ResourceClient, ResourceKind};

use crate::cli::{LabelArgs, ListArgs};
use crate::error::CliError;

/// Look up a resource by ID or name, failing when it does not exist.
pub async fn require<K: ManagedKind>(
    client: &ResourceClient<K>,
    id_or_name: &str,
    list_command: &str,
) -> Result<K::Entity, CliError> {
    let (entity, _) = client.get(id_or_name).await?;
    entity.ok_or_else(|| CliError::not_found(K::KIND, id_or_name, list_command))
}

/// A single page when `--page` is given, otherwise every page.
pub async fn fetch<K: ResourceKind>(
    client: &ResourceClient<K>,
    list: &ListArgs,
    mut opts: K::ListOpts,
) -> Result<Vec<K::Entity>, CliError> {
    *opts.list_opts_mut() = list_opts(list);
    if list.page.is_some() {
        let (items, _) = client.list(&opts).await?;
        Ok(items)
    } else {
        Ok(client.all_with_opts(opts).await?)
    }
}

pub fn list_opts(list: &ListArgs) -> ListOpts {
    ListOpts {
        page: list.page,
        per_page: list.per_page,
        label_selector: list.selector.clone(),
    }
}

/// Parse repeated `key=value` labels.
pub fn parse_labels(raw: &[String]) -> Result<Labels, CliError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
            _ => Err(CliError::Validation {
                field: "label".into(),
                reason: format!("expected KEY=VALUE, got '{pair}'"),
            }),
        })
        .collect()
}

/// Labels for a create request: `None` when no `--label` was given.
pub fn create_labels(args: &LabelArgs) -> Result<Option<Labels>, CliError> {
    if args.labels.is_empty() {
        Ok(None)
    } else {
        parse_labels(&args.labels).map(Some)
    }
}

/// Labels for an update request. `--clear-labels` sends an empty set.
pub fn update_labels(args: &LabelArgs, clear: bool) -> Result<Option<Labels>, CliError> {
    if clear {
        return Ok(Some(Labels::new()));
    }
    create_labels(args)
}

/// Labels as sorted `k=v` pairs.
pub fn fmt_labels(labels: &Labels) -> String {
    let mut pairs: Vec<String> = labels.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    pairs.join(", ")
}

pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--*-file` flags.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}
