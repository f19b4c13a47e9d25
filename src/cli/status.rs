//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::client::Credentials;
use crate::client::cloudflare::DEFAULT_API_HOST;
use crate::config::Config;
use crate::error::Result;
use crate::resource::ResourceData;

/// Run the status command to display configuration and state status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "spectrumctl Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(_) => {
            println!(
                "{} Config file not found ({})",
                "○".dimmed(),
                config_path.display()
            );
            Config::default()
        }
    };
    config.apply_overrides(&opts.overrides());

    println!();

    match config.credentials() {
        Ok(Credentials::Token(_)) => println!("{} API token configured", "✓".green()),
        Ok(Credentials::Key { email, .. }) => {
            println!("{} Global API key configured for {}", "✓".green(), email)
        }
        Err(_) => {
            println!("{} Credentials not configured", "✗".red());
            println!("  → Run 'spectrumctl init' or set CLOUDFLARE_API_TOKEN");
        }
    }

    match &config.api_host {
        Some(host) => println!("{} Custom API host: {}", "○".dimmed(), host.cyan()),
        None => println!("{} API host: {}", "○".dimmed(), DEFAULT_API_HOST.dimmed()),
    }

    println!();

    let state_path = &opts.state;
    if !state_path.exists() {
        println!(
            "{} No state file at {}",
            "○".dimmed(),
            state_path.display()
        );
    } else {
        match ResourceData::load_from(state_path) {
            Ok(data) if data.exists() => println!(
                "{} Tracking application {} in zone {}",
                "✓".green(),
                data.id().bold(),
                data.zone_id()
            ),
            Ok(_) => println!(
                "{} State file {} has no application (deleted or gone)",
                "⚠".yellow(),
                state_path.display()
            ),
            Err(e) => println!(
                "{} State file {} is unreadable: {}",
                "✗".red(),
                state_path.display(),
                e
            ),
        }
    }

    println!();
    Ok(())
}
