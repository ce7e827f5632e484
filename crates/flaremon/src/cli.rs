//! Clap derive structures for the `flaremon` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this file may
//! only depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// flaremon -- Prometheus exporter for Cloudflare zone analytics
#[derive(Debug, Parser)]
#[command(
    name = "flaremon",
    version,
    about = "Export Cloudflare zone analytics as Prometheus metrics",
    long_about = "Collects dashboard analytics, DNS analytics, and platform status for\n\
        Cloudflare zones and serves them in the Prometheus text format.\n\n\
        Each zone is queried with a window and granularity that its plan allows.",
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
    /// Config file (defaults to the platform config dir)
    #[arg(long, short = 'c', env = "FLAREMON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Cloudflare API token
    #[arg(long, env = "CF_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Cloudflare global API key (requires --api-email)
    #[arg(long, env = "CF_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Account email for the global API key
    #[arg(long, env = "CF_API_EMAIL", global = true)]
    pub api_email: Option<String>,

    /// Cloudflare API base URL
    #[arg(long, env = "CF_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Status page summary URL
    #[arg(long, env = "CF_STATUS_URL", global = true)]
    pub status_url: Option<String>,

    /// Zone names to monitor (repeat or comma-separate; default: all)
    #[arg(
        long = "zone",
        short = 'z',
        env = "CF_ZONES",
        value_delimiter = ',',
        global = true
    )]
    pub zones: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CF_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Zones collected at once
    #[arg(long, env = "CF_CONCURRENCY", global = true)]
    pub concurrency: Option<usize>,

    /// Skip dashboard analytics
    #[arg(long, env = "CF_NO_DASHBOARD", global = true)]
    pub no_dashboard: bool,

    /// Skip DNS analytics
    #[arg(long, env = "CF_NO_DNS", global = true)]
    pub no_dns: bool,

    /// Skip the status feed
    #[arg(long, env = "CF_NO_STATUS", global = true)]
    pub no_status: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(
        long,
        env = "FLAREMON_LOG_FORMAT",
        default_value = "text",
        global = true
    )]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve metrics over HTTP
    Serve(ServeArgs),

    /// Collect once and print the exposition to stdout
    Scrape,

    /// List the zones that would be monitored
    Zones(ZonesArgs),

    /// Print the effective configuration (secrets redacted)
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on, e.g. 0.0.0.0:9199
    #[arg(long)]
    pub listen_address: Option<String>,

    /// Path under which metrics are exposed
    #[arg(long)]
    pub telemetry_path: Option<String>,
}

#[derive(Debug, Args)]
pub struct ZonesArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
