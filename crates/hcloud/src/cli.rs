//! Clap derive structures for the `hcloud` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.
//! Only clap types appear here so `build.rs` can render man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hcloud -- manage Hetzner Cloud firewalls, volumes and primary IPs
#[derive(Debug, Parser)]
#[command(
    name = "hcloud",
    version,
    about = "Manage Hetzner Cloud resources from the command line",
    long_about = "Manage Hetzner Cloud firewalls, volumes and primary IPs.\n\n\
        Identifiers may be numeric IDs or names. Mutating commands return the\n\
        server-side actions they started; pass --wait to block until they finish.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "HCLOUD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API endpoint (overrides profile)
    #[arg(long, env = "HCLOUD_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API token (overrides profile and HCLOUD_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HCLOUD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HCLOUD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Delay between action polls in milliseconds (at least 10)
    #[arg(long, env = "HCLOUD_POLL_INTERVAL", global = true)]
    pub poll_interval: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage firewalls, their rules and where they apply
    #[command(alias = "fw")]
    Firewall(FirewallArgs),

    /// Manage block storage volumes
    #[command(alias = "vol")]
    Volume(VolumeArgs),

    /// Manage primary IPs
    #[command(alias = "pip")]
    PrimaryIp(PrimaryIpArgs),

    /// Inspect and wait on server-side actions
    Action(ActionArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Shared pagination and filtering arguments for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Label selector, e.g. "env=prod,!legacy"
    #[arg(long, short = 'l')]
    pub selector: Option<String>,

    /// Fetch a single page instead of walking all pages
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Sort key, e.g. "name:desc" (repeatable)
    #[arg(long)]
    pub sort: Vec<String>,
}

/// Block until the returned actions finish.
#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Wait for the started actions to complete
    #[arg(long, short = 'w')]
    pub wait: bool,
}

/// Label arguments shared by create and update commands.
#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Label as key=value (repeatable)
    #[arg(long = "label", value_name = "KEY=VALUE")]
    pub labels: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FIREWALLS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FirewallArgs {
    #[command(subcommand)]
    pub command: FirewallCommand,
}

/// Where a firewall applies: servers by ID and/or label selectors.
#[derive(Debug, Args)]
pub struct FirewallTargetArgs {
    /// Server ID (repeatable)
    #[arg(long = "server", value_name = "ID")]
    pub servers: Vec<i64>,

    /// Label selector (repeatable)
    #[arg(long = "label-selector", value_name = "SELECTOR")]
    pub selectors: Vec<String>,
}

/// Rule sources: inline specs or a JSON file.
#[derive(Debug, Args)]
pub struct FirewallRuleArgs {
    /// Rule as DIRECTION:PROTOCOL[:PORT[:CIDR,...]], e.g. "in:tcp:22:0.0.0.0/0,::/0"
    #[arg(long = "rule", value_name = "SPEC")]
    pub rules: Vec<String>,

    /// Read rules from a JSON array file
    #[arg(long, conflicts_with = "rules")]
    pub rules_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// List firewalls
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Exact name filter
        #[arg(long)]
        name: Option<String>,
    },

    /// Show one firewall
    Get {
        /// Firewall ID or name
        firewall: String,
    },

    /// Create a firewall
    Create {
        /// Firewall name
        #[arg(long)]
        name: String,

        #[command(flatten)]
        labels: LabelArgs,

        #[command(flatten)]
        rules: FirewallRuleArgs,

        #[command(flatten)]
        apply_to: FirewallTargetArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Rename a firewall or replace its labels
    Update {
        /// Firewall ID or name
        firewall: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        labels: LabelArgs,

        /// Remove all labels
        #[arg(long, conflicts_with = "labels")]
        clear_labels: bool,
    },

    /// Delete a firewall
    #[command(alias = "rm")]
    Delete {
        /// Firewall ID or name
        firewall: String,
    },

    /// Replace all rules (no rules clears them)
    SetRules {
        /// Firewall ID or name
        firewall: String,

        #[command(flatten)]
        rules: FirewallRuleArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Apply the firewall to servers or label selectors
    ApplyTo {
        /// Firewall ID or name
        firewall: String,

        #[command(flatten)]
        targets: FirewallTargetArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Remove the firewall from servers or label selectors
    RemoveFrom {
        /// Firewall ID or name
        firewall: String,

        #[command(flatten)]
        targets: FirewallTargetArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VOLUMES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VolumeArgs {
    #[command(subcommand)]
    pub command: VolumeCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VolumeStatusArg {
    Creating,
    Available,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VolumeFormatArg {
    Ext4,
    Xfs,
}

#[derive(Debug, Subcommand)]
pub enum VolumeCommand {
    /// List volumes
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Exact name filter
        #[arg(long)]
        name: Option<String>,

        /// Status filter (repeatable)
        #[arg(long)]
        status: Vec<VolumeStatusArg>,
    },

    /// Show one volume
    Get {
        /// Volume ID or name
        volume: String,
    },

    /// Create a volume in a location or attached to a server
    Create {
        /// Volume name
        #[arg(long)]
        name: String,

        /// Size in GB
        #[arg(long)]
        size: u32,

        /// Server ID to attach to
        #[arg(long)]
        server: Option<i64>,

        /// Location name or ID
        #[arg(long)]
        location: Option<String>,

        /// Mount automatically after attaching (requires --server)
        #[arg(long)]
        automount: bool,

        /// Filesystem to format with
        #[arg(long)]
        format: Option<VolumeFormatArg>,

        #[command(flatten)]
        labels: LabelArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Rename a volume or replace its labels
    Update {
        /// Volume ID or name
        volume: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        labels: LabelArgs,

        /// Remove all labels
        #[arg(long, conflicts_with = "labels")]
        clear_labels: bool,
    },

    /// Delete a volume
    #[command(alias = "rm")]
    Delete {
        /// Volume ID or name
        volume: String,
    },

    /// Attach a volume to a server
    Attach {
        /// Volume ID or name
        volume: String,

        /// Server ID
        #[arg(long)]
        server: i64,

        /// Mount automatically
        #[arg(long)]
        automount: Option<bool>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Detach a volume from its server
    Detach {
        /// Volume ID or name
        volume: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Grow a volume
    Resize {
        /// Volume ID or name
        volume: String,

        /// New size in GB
        #[arg(long)]
        size: u32,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Enable or disable delete protection
    Protect {
        /// Volume ID or name
        volume: String,

        /// Protect against deletion
        #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
        delete: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRIMARY IPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PrimaryIpArgs {
    #[command(subcommand)]
    pub command: PrimaryIpCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PrimaryIpTypeArg {
    Ipv4,
    Ipv6,
}

#[derive(Debug, Subcommand)]
pub enum PrimaryIpCommand {
    /// List primary IPs
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Exact name filter
        #[arg(long)]
        name: Option<String>,

        /// Exact address filter
        #[arg(long)]
        ip: Option<String>,
    },

    /// Show one primary IP
    Get {
        /// Primary IP ID or name
        primary_ip: String,
    },

    /// Create a primary IP in a datacenter or assigned to a server
    Create {
        /// Primary IP name
        #[arg(long)]
        name: String,

        /// Address family
        #[arg(long = "type", value_name = "TYPE")]
        kind: PrimaryIpTypeArg,

        /// Datacenter name
        #[arg(long)]
        datacenter: Option<String>,

        /// Server ID to assign to
        #[arg(long)]
        assignee_id: Option<i64>,

        /// Delete together with the assigned server
        #[arg(long)]
        auto_delete: Option<bool>,

        #[command(flatten)]
        labels: LabelArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Rename a primary IP, replace its labels or toggle auto-delete
    Update {
        /// Primary IP ID or name
        primary_ip: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        labels: LabelArgs,

        /// Remove all labels
        #[arg(long, conflicts_with = "labels")]
        clear_labels: bool,

        /// Delete together with the assigned server
        #[arg(long)]
        auto_delete: Option<bool>,
    },

    /// Delete a primary IP
    #[command(alias = "rm")]
    Delete {
        /// Primary IP ID or name
        primary_ip: String,
    },

    /// Assign to a server
    Assign {
        /// Primary IP ID or name
        primary_ip: String,

        /// Server ID
        #[arg(long)]
        server: i64,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Unassign from its server
    Unassign {
        /// Primary IP ID or name
        primary_ip: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Set or reset the reverse DNS pointer
    SetRdns {
        /// Primary IP ID or name
        primary_ip: String,

        /// Address inside the primary IP (defaults to the primary address)
        #[arg(long)]
        ip: Option<String>,

        /// Hostname; omit to reset to the default pointer
        #[arg(long)]
        hostname: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Enable or disable delete protection
    Protect {
        /// Primary IP ID or name
        primary_ip: String,

        /// Protect against deletion
        #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
        delete: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACTIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ActionArgs {
    #[command(subcommand)]
    pub command: ActionCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActionStatusArg {
    Running,
    Success,
    Error,
}

#[derive(Debug, Subcommand)]
pub enum ActionCommand {
    /// List actions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Status filter (repeatable)
        #[arg(long)]
        status: Vec<ActionStatusArg>,

        /// Action ID filter (repeatable)
        #[arg(long)]
        id: Vec<i64>,
    },

    /// Show one action
    Get {
        /// Action ID
        id: i64,
    },

    /// Poll actions until they succeed or fail
    Wait {
        /// Action IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration (tokens masked)
    Show,

    /// Set a configuration value
    Set {
        /// Config key, e.g. "defaults.output" or "profiles.prod.token_env"
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
