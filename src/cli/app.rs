//! Spectrum application commands
//!
//! Each command loads the local state file, runs one resource operation and
//! writes the state back.

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;
use log::{debug, info};

use crate::cli::context::resolve_format;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::SpectrumApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{SpectrumAppDisplay, state_rows};
use crate::output::{json, table};
use crate::resource::{RESOURCE_TYPE, ResourceData, SpectrumAppConfig};

// ============================================================================
// Create / Update
// ============================================================================

/// Create the declared application
pub async fn create(opts: &GlobalOptions, file: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if let Some(existing) = load_state(&ctx.state_path)? {
        if existing.exists() {
            return Err(Error::Other(format!(
                "{} already tracks application {}; run `spectrumctl update` or `spectrumctl delete`",
                ctx.state_path.display(),
                existing.id()
            )));
        }
    }

    let config = SpectrumAppConfig::load(file)?;
    let mut data = ResourceData::new(config);

    let result = ctx.handler.create(&mut data).await;
    // The remote object exists as soon as it has an id, even if the
    // follow-up read failed.
    if data.exists() {
        data.save_to(&ctx.state_path)?;
    }
    result?;

    print_state(&data, ctx.format, "Created")
}

/// Update the tracked application from the declared file
pub async fn update(opts: &GlobalOptions, file: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut data = require_state(&ctx.state_path)?;

    let config = SpectrumAppConfig::load(file)?;
    if config.zone_id != data.config.zone_id {
        return Err(Error::Other(format!(
            "zone_id cannot change in place ({} -> {}); delete and create instead",
            data.config.zone_id, config.zone_id
        )));
    }
    data.config = config;

    ctx.handler.update(&mut data).await?;
    data.save_to(&ctx.state_path)?;

    print_state(&data, ctx.format, "Updated")
}

// ============================================================================
// Read / Show
// ============================================================================

/// Refresh local state from the remote application
pub async fn read(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut data = require_state(&ctx.state_path)?;

    ctx.handler.read(&mut data).await?;
    data.save_to(&ctx.state_path)?;

    if !data.exists() {
        eprintln!(
            "{} Application no longer exists remotely; run `spectrumctl create` to recreate it",
            "⚠".yellow()
        );
    }

    print_state(&data, ctx.format, "Refreshed")
}

/// Print local state without contacting the API
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_or_default(opts.config_ref())?;
    let data = load_state(&opts.state)?.ok_or_else(|| missing_state(&opts.state))?;
    print_state(&data, resolve_format(opts, &config), "Tracked")
}

// ============================================================================
// Delete
// ============================================================================

/// Delete the tracked application
pub async fn delete(opts: &GlobalOptions, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut data = require_state(&ctx.state_path)?;
    let app_id = data.id().to_string();

    if !yes {
        eprintln!(
            "{} Delete Spectrum application {} in zone {}? This cannot be undone.",
            "⚠".yellow(),
            app_id,
            data.zone_id()
        );
        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    ctx.handler.delete(&mut data).await?;
    data.save_to(&ctx.state_path)?;

    match ctx.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "deleted": true, "id": app_id });
            println!("{}", json::format_resource_json(RESOURCE_TYPE, &output)?);
        }
        _ => {
            eprintln!("{} Spectrum application {} deleted", "✓".green(), app_id);
        }
    }

    Ok(())
}

// ============================================================================
// Import / List
// ============================================================================

/// Import an existing application by `zoneName/applicationID`
pub async fn import(opts: &GlobalOptions, import_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if let Some(existing) = load_state(&ctx.state_path)? {
        if existing.exists() {
            return Err(Error::Other(format!(
                "{} already tracks application {}",
                ctx.state_path.display(),
                existing.id()
            )));
        }
    }

    let mut data = ctx.handler.import(import_id).await?;
    ctx.handler.read(&mut data).await?;

    if !data.exists() {
        return Err(Error::Other(format!(
            "cannot import non-existent remote object {}",
            import_id
        )));
    }

    data.save_to(&ctx.state_path)?;
    info!("Imported {} into {}", import_id, ctx.state_path.display());

    print_state(&data, ctx.format, "Imported")
}

/// List applications in a zone
pub async fn list(
    opts: &GlobalOptions,
    zone: Option<&str>,
    zone_name: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let zone_id = match (zone, zone_name) {
        (Some(zone), _) => zone.to_string(),
        (None, Some(name)) => ctx.client.zone_id_by_name(name).await?,
        (None, None) => return Err(Error::Other("a zone is required".to_string())),
    };
    debug!("Listing Spectrum applications in zone {}", zone_id);

    let apps = ctx.client.list_applications(&zone_id).await?;
    let display: Vec<SpectrumAppDisplay> = apps.iter().map(SpectrumAppDisplay::from).collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_resource_json(RESOURCE_TYPE, &apps)?),
        _ => println!("{}", table::format_table(&display)),
    }

    Ok(())
}

// ============================================================================
// State & Display Helpers
// ============================================================================

fn load_state(path: &Path) -> Result<Option<ResourceData>> {
    if !path.exists() {
        return Ok(None);
    }
    ResourceData::load_from(path).map(Some)
}

/// State that must exist and track a remote object
fn require_state(path: &Path) -> Result<ResourceData> {
    let data = load_state(path)?.ok_or_else(|| missing_state(path))?;
    if !data.exists() {
        return Err(Error::Other(format!(
            "{} does not track an application; run `spectrumctl create` or `spectrumctl import`",
            path.display()
        )));
    }
    Ok(data)
}

fn missing_state(path: &Path) -> Error {
    Error::Other(format!(
        "state file {} not found; run `spectrumctl create` or `spectrumctl import`",
        path.display()
    ))
}

fn print_state(data: &ResourceData, format: OutputFormat, verb: &str) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", json::format_resource_json(RESOURCE_TYPE, data)?);
        }
        OutputFormat::Table => {
            println!("{}", table::format_record(&state_rows(data)));
        }
        OutputFormat::Pretty => {
            println!();
            if data.exists() {
                println!("{} {} {}", "✓".green(), verb, "Spectrum application".bold());
            } else {
                println!(
                    "{} {}",
                    "○".dimmed(),
                    "Spectrum application (not present remotely)".bold()
                );
            }
            for (field, value) in state_rows(data) {
                println!("  {:<15} {}", format!("{}:", field).dimmed(), value);
            }
            println!();
        }
    }
    Ok(())
}
