//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

const FORMATS: [&str; 3] = ["pretty", "table", "json"];

/// Run the init command
///
/// Prompts for credentials and a default output format, then writes the
/// config file. Existing values not prompted for (such as `api_host`) are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to spectrumctl!".bold().green());
    println!("Let's set up your Cloudflare credentials.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;

    let method = Select::with_theme(&theme)
        .with_prompt("How do you want to authenticate?")
        .items(&["API token (recommended)", "Global API key + account email"])
        .default(0)
        .interact()?;

    if method == 0 {
        let token: String = Password::with_theme(&theme)
            .with_prompt("Enter your Cloudflare API token")
            .interact()?;
        config.api_token = Some(token);
        config.api_email = None;
        config.api_key = None;
    } else {
        let email: String = Input::with_theme(&theme)
            .with_prompt("Account email")
            .interact_text()?;
        let key: String = Password::with_theme(&theme)
            .with_prompt("Global API key")
            .interact()?;
        config.api_token = None;
        config.api_email = Some(email);
        config.api_key = Some(key);
    }

    let current = config
        .preferences
        .format
        .as_deref()
        .and_then(|f| FORMATS.iter().position(|name| *name == f))
        .unwrap_or(0);
    let format = Select::with_theme(&theme)
        .with_prompt("Default output format")
        .items(&FORMATS)
        .default(current)
        .interact()?;
    config.preferences.format = Some(FORMATS[format].to_string());

    // Fail now rather than on the first remote command
    config.credentials()?;
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "spectrumctl status".cyan());
    println!("  {} - Show the resource schema", "spectrumctl schema".cyan());
    println!(
        "  {} - List applications in a zone",
        "spectrumctl list --zone-name example.com".cyan()
    );

    Ok(())
}
