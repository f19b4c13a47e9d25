//! Command execution context
//!
//! Loads configuration, resolves credentials and builds the API client and
//! resource handler shared by the remote commands.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::CloudflareClient;
use crate::config::Config;
use crate::error::Result;
use crate::resource::SpectrumAppResource;

/// Shared state for commands that talk to the Cloudflare API.
pub struct CommandContext {
    /// Authenticated API client (shared with the handler)
    pub client: Arc<CloudflareClient>,
    /// Resource handler bound to `client`
    pub handler: SpectrumAppResource<CloudflareClient>,
    /// Output format preference
    pub format: OutputFormat,
    /// Local state file
    pub state_path: PathBuf,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not an error as long as credentials arrive via
    /// flags or environment.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default(opts.config_ref())?;
        config.apply_overrides(&opts.overrides());

        let credentials = config.credentials()?;
        debug!("Using credentials: {:?}", credentials);

        let client = Arc::new(CloudflareClient::with_host(
            credentials,
            config.api_host.clone(),
        )?);
        debug!("API base URL: {}", client.base_url());

        let handler = SpectrumAppResource::new(Arc::clone(&client));

        Ok(Self {
            format: resolve_format(opts, &config),
            state_path: opts.state.clone(),
            client,
            handler,
        })
    }
}

/// Flag/env format first, then the config preference, then pretty
pub fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
    opts.format
        .or_else(|| {
            config
                .preferences
                .format
                .as_deref()
                .and_then(OutputFormat::from_name)
        })
        .unwrap_or_default()
}
