mod favorites;
mod render;
mod search;
mod upstream;

use clap::{Parser, Subcommand};
use tablefind_core::{AppConfig, Cuisine};
use tablefind_session::{FileStore, Session};
use tracing_subscriber::EnvFilter;

use crate::favorites::FavoritesCommands;

#[derive(Debug, Parser)]
#[command(name = "tablefind")]
#[command(about = "Search restaurants and keep a list of favorites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the configured provider and print matching restaurants
    Search {
        /// Restaurant name, or part of one
        #[arg(long, default_value = "")]
        name: String,
        /// Free-text location, e.g. a city or neighbourhood
        #[arg(long, default_value = "")]
        location: String,
        /// Free-text food type, e.g. "sushi" or "tagine"
        #[arg(long, default_value = "")]
        food_type: String,
        /// Cuisine; `other` matches every cuisine
        #[arg(long)]
        cuisine: Option<Cuisine>,
        /// Latitude to search around (requires --lng)
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude to search around (requires --lat)
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },
    /// Fetch and print the full details of one restaurant
    Show {
        /// Restaurant key as printed by `search`
        key: String,
    },
    /// Manage saved favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = tablefind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, provider = %config.provider, "configuration loaded");

    match cli.command {
        Commands::Search {
            name,
            location,
            food_type,
            cuisine,
            lat,
            lng,
        } => {
            let args = search::SearchArgs {
                name,
                location,
                food_type,
                cuisine,
                coordinates: lat.zip(lng),
            };
            search::run_search(&config, args).await?;
        }
        Commands::Show { key } => search::run_show(&config, &key).await?,
        Commands::Favorites { command } => match command {
            FavoritesCommands::List => favorites::run_favorites_list(&config),
            FavoritesCommands::Toggle { key } => {
                favorites::run_favorites_toggle(&config, &key).await?;
            }
        },
    }

    Ok(())
}

/// Opens the session backed by the configured data directory.
fn open_session(config: &AppConfig) -> Session<FileStore> {
    Session::start(FileStore::new(&config.data_dir), config.remember_search)
}
