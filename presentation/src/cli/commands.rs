//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, colored
    #[default]
    Text,
    /// JSON document on stdout
    Json,
}

/// CLI arguments for notehub
#[derive(Parser, Debug)]
#[command(name = "notehub")]
#[command(author, version, about = "Partner note retrieval and review classification")]
#[command(long_about = r#"
notehub retrieves notes and books from partner services, normalizes their
responses and checks locally authored notes against the owning tenant's
review length rules.

Configuration files are loaded from (in priority order):
1. NOTEHUB_* environment variables (NOTEHUB_WORKER__MAX_CONCURRENT=8)
2. --config <path>           Explicit config file
3. ./notehub.toml            Project-level config
4. ~/.config/notehub/config.toml   Global config

Example:
  notehub fetch user-17 --param author=Borges
  notehub fetch north south --books
  notehub classify --tenant south "A short review"
  notehub validate --owner user-17 --title Ficciones --content "Great" --note-type review
"#)]
pub struct Cli {
    /// Omitted only together with --show-config
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Retrieve notes (or books) for owners from their partner services
    Fetch {
        /// Owner references (or tenant names); retrieved concurrently
        #[arg(required = true)]
        owners: Vec<String>,

        /// Retrieve books instead of notes
        #[arg(long)]
        books: bool,

        /// Query parameter forwarded to the partner (can be specified multiple times)
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Classify text against a tenant's length thresholds
    Classify {
        /// Tenant name
        #[arg(short, long)]
        tenant: String,

        /// Text to classify
        text: String,
    },

    /// Validate and store a note for an owner
    Validate {
        #[arg(long)]
        owner: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// "review" or "critique"
        #[arg(long)]
        note_type: Option<String>,
    },

    /// List configured tenants
    Tenants,
}

/// Parse a `key=value` pair; the value may be empty or contain `=`
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
