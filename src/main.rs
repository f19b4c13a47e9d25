//! spectrumctl - Manage Cloudflare Spectrum applications declaratively

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod resource;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warn, or debug with `--debug`
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("spectrumctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Schema => cli::schema::run(&opts),
        Commands::Create { file } => cli::app::create(&opts, &file).await,
        Commands::Read => cli::app::read(&opts).await,
        Commands::Update { file } => cli::app::update(&opts, &file).await,
        Commands::Delete { yes } => cli::app::delete(&opts, yes).await,
        Commands::Import { id } => cli::app::import(&opts, &id).await,
        Commands::Show => cli::app::show(&opts),
        Commands::List { zone, zone_name } => {
            cli::app::list(&opts, zone.as_deref(), zone_name.as_deref()).await
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
