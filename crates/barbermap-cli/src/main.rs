mod market;
mod zones;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::market::{ColorLayer, FilterArgs};
use crate::zones::ZonesArgs;

#[derive(Debug, Parser)]
#[command(name = "barbermap")]
#[command(about = "Barbershop market map: opportunity zones and market statistics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find underserved locations far from every existing shop
    Zones(ZonesArgs),
    /// Summarize ratings, prices, and services of the filtered shops
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
        /// Read shops from this JSON file instead of the configured one
        #[arg(long)]
        businesses: Option<std::path::PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the filtered shops
    Shops {
        #[command(flatten)]
        filters: FilterArgs,
        /// Read shops from this JSON file instead of the configured one
        #[arg(long)]
        businesses: Option<std::path::PathBuf>,
        /// Maximum number of shops to show
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Show the map color for a population or density value
    Color {
        #[arg(value_enum)]
        layer: ColorLayer,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// List configured scan regions
    Regions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = barbermap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Zones(args)) => zones::run_zones(&config, &args)?,
        Some(Commands::Stats {
            filters,
            businesses,
            json,
        }) => market::run_stats(&config, &filters.into(), businesses.as_deref(), json)?,
        Some(Commands::Shops {
            filters,
            businesses,
            limit,
        }) => market::run_shops(&config, &filters.into(), businesses.as_deref(), limit)?,
        Some(Commands::Color { layer, value }) => market::run_color(layer, value),
        Some(Commands::Regions) => zones::run_regions(&config)?,
        None => println!("barbermap ready; run `barbermap --help` for commands"),
    }

    Ok(())
}
