mod masters;
mod search;
mod shops;

use clap::{Parser, Subcommand};
use gourmet_core::{Amenity, AppConfig};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "gourmet")]
#[command(about = "Search nearby restaurants and manage bookmarks")]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search shops by location and filters
    Search(SearchArgs),
    /// List bookmarked shops
    Favorites {
        /// Page to show (20 shops per page)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Add a shop to bookmarks, or remove it if already bookmarked
    Bookmark {
        /// Shop id (e.g., J001234567)
        id: String,
    },
    /// Show shop details with facility marks
    Show {
        /// Shop id (e.g., J001234567)
        id: String,
    },
    /// List genre codes
    Genres,
    /// List budget codes
    Budgets,
    /// List amenity flag names accepted by `search --amenity`
    Amenities,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = gourmet_core::load_app_config()?;
    init_tracing(&config)?;

    let cli = Cli::parse();
    tracing::debug!(env = %config.env, command = ?cli.command, "starting");

    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args, cli.json).await,
        Commands::Favorites { page } => search::run_favorites(&config, page, cli.json).await,
        Commands::Bookmark { id } => shops::run_bookmark(&config, &id),
        Commands::Show { id } => shops::run_show(&config, &id, cli.json).await,
        Commands::Genres => masters::run_genres(&config, cli.json).await,
        Commands::Budgets => masters::run_budgets(&config, cli.json).await,
        Commands::Amenities => {
            for amenity in Amenity::ALL {
                println!("{:<14}{}", amenity.key(), amenity.label());
            }
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so table
/// and JSON output stay clean.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
