//! Schema command implementation

use colored::Colorize;

use crate::cli::context::resolve_format;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::models::SchemaFieldDisplay;
use crate::output::{json, table};
use crate::resource::spectrum_app_schema;

/// Print the resource schema; needs neither credentials nor network
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let schema = spectrum_app_schema();
    let config = Config::load_or_default(opts.config_ref())?;

    match resolve_format(opts, &config) {
        OutputFormat::Json => {
            println!("{}", json::format_resource_json(schema.type_name, schema)?);
        }
        OutputFormat::Table => {
            println!("{}", table::format_table(&SchemaFieldDisplay::rows(schema)));
        }
        OutputFormat::Pretty => {
            println!();
            println!(
                "{} {}",
                schema.type_name.bold(),
                format!("(schema version {})", schema.version).dimmed()
            );
            println!();
            for row in SchemaFieldDisplay::rows(schema) {
                let depth = row.name.matches('.').count();
                let presence = match row.presence.as_str() {
                    "required" => row.presence.yellow(),
                    "computed" => row.presence.dimmed(),
                    _ => row.presence.normal(),
                };
                println!(
                    "{}• {} {} [{}]",
                    "  ".repeat(depth + 1),
                    row.name.cyan(),
                    row.kind,
                    presence
                );
                if row.default != "--" {
                    println!("{}  default: {}", "  ".repeat(depth + 1), row.default);
                }
                if row.constraints != "--" {
                    println!("{}  {}", "  ".repeat(depth + 1), row.constraints.dimmed());
                }
            }
            println!();
        }
    }

    Ok(())
}
