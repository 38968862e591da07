mod catalog;
mod recommend;
mod requests;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::CatalogCommands;
use crate::requests::RequestsCommands;

#[derive(Debug, Parser)]
#[command(name = "hh-cli")]
#[command(about = "Hunger's Harmony command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Admin shop requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommands,
    },
    /// Show weather-based food and drink recommendations
    Recommend {
        /// Province slug (defaults to HH_DEFAULT_PROVINCE)
        #[arg(long)]
        province: Option<String>,
        /// Use this temperature in °C instead of looking up the weather
        #[arg(long, allow_negative_numbers = true, value_parser = recommend::parse_temperature)]
        temperature: Option<f64>,
        /// Show every product without weather filtering
        #[arg(long)]
        all: bool,
    },
    /// Catalog maintenance
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// List known provinces
    Provinces,
}

/// Run the commands that need no configuration. Anything else is handed
/// back so a bad environment cannot break `--help` or `provinces`.
fn run_standalone(command: Option<Commands>) -> Option<Commands> {
    match command {
        None => {
            println!("hh-cli ready; run `hh-cli --help` for commands");
            None
        }
        Some(Commands::Provinces) => {
            catalog::run_provinces();
            None
        }
        Some(command) => Some(command),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = run_standalone(cli.command) else {
        return Ok(());
    };

    let config = hh_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Requests { command } => requests::run(&config, command)?,
        Commands::Recommend {
            province,
            temperature,
            all,
        } => recommend::run_recommend(&config, province.as_deref(), temperature, all).await?,
        Commands::Catalog {
            command: CatalogCommands::Validate,
        } => catalog::run_catalog_validate(&config)?,
        Commands::Provinces => catalog::run_provinces(),
    }

    Ok(())
}
