//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod app;
pub mod args;
pub mod completions;
pub mod context;
pub mod init;
pub mod schema;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// Default declared configuration file
pub const DEFAULT_APP_FILE: &str = "spectrum_app.yaml";

/// Default local state file
pub const DEFAULT_STATE_FILE: &str = "spectrum_app.state.json";

/// spectrumctl - Manage Cloudflare Spectrum applications declaratively
#[derive(Parser, Debug)]
#[command(name = "spectrumctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "SPECTRUMCTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SPECTRUMCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Local state file of the managed application
    #[arg(
        long,
        global = true,
        env = "SPECTRUMCTL_STATE",
        hide_env = true,
        default_value = DEFAULT_STATE_FILE
    )]
    pub state: PathBuf,

    /// Cloudflare API token
    #[arg(
        long,
        global = true,
        env = "CLOUDFLARE_API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,

    /// Account email for legacy API key auth
    #[arg(long, global = true, env = "CLOUDFLARE_EMAIL")]
    pub api_email: Option<String>,

    /// Legacy global API key
    #[arg(long, global = true, env = "CLOUDFLARE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "SPECTRUMCTL_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SPECTRUMCTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize spectrumctl configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Print the cloudflare_spectrum_app resource schema
    Schema,

    /// Create the application declared in a YAML file
    #[command(after_help = "EXAMPLES:\n  \
            spectrumctl create                        # Uses ./spectrum_app.yaml\n  \
            spectrumctl create -f ssh.yaml --state ssh.state.json")]
    Create {
        /// Declared application (YAML)
        #[arg(long, short = 'f', default_value = DEFAULT_APP_FILE)]
        file: PathBuf,
    },

    /// Refresh local state from the remote application
    #[command(visible_alias = "refresh")]
    Read,

    /// Apply a changed declaration to the existing application
    Update {
        /// Declared application (YAML)
        #[arg(long, short = 'f', default_value = DEFAULT_APP_FILE)]
        file: PathBuf,
    },

    /// Delete the remote application and clear local state
    Delete {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Adopt an existing application into local state
    #[command(after_help = "EXAMPLES:\n  \
            spectrumctl import example.com/d9a1b0e4c2f84f0fa2c1b9f7d1e6a3c5")]
    Import {
        /// Import ID in the form zoneName/applicationID
        id: String,
    },

    /// Show local state without contacting the API
    Show,

    /// List Spectrum applications in a zone
    #[command(visible_alias = "ls")]
    List {
        /// Zone ID
        #[arg(long, conflicts_with = "zone_name", required_unless_present = "zone_name")]
        zone: Option<String>,

        /// Zone name (e.g. example.com), resolved to its ID
        #[arg(long = "zone-name")]
        zone_name: Option<String>,
    },

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   spectrumctl completion bash > /etc/bash_completion.d/spectrumctl
  zsh:    spectrumctl completion zsh > \"${fpath[1]}/_spectrumctl\"
  fish:   spectrumctl completion fish > ~/.config/fish/completions/spectrumctl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
