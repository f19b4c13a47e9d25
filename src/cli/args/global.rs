//! Global CLI options shared across all commands
//!
//! Consolidates the global flags into one struct so command handlers take a
//! single `&GlobalOptions` instead of a long parameter list.

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::ConfigOverrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; the config file is merged in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json); `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.spectrumctl/config.yaml)
    pub config: Option<String>,

    /// Local state file of the managed application
    pub state: PathBuf,

    /// Custom API host for development/testing
    pub api_host: Option<String>,

    pub api_token: Option<String>,
    pub api_email: Option<String>,
    pub api_key: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            state: cli.state.clone(),
            api_host: cli.api_host.clone(),
            api_token: cli.api_token.clone(),
            api_email: cli.api_email.clone(),
            api_key: cli.api_key.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Flag/env values that override the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_token: self.api_token.clone(),
            api_email: self.api_email.clone(),
            api_key: self.api_key.clone(),
            api_host: self.api_host.clone(),
        }
    }
}
