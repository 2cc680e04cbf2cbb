//! lightbnb CLI - operator access to the LightBnB database
//!
//! Provides:
//! - Schema migrations (`migrate`)
//! - User lookup and sign-up (`user`)
//! - A guest's reservations (`reservations`)
//! - Filtered property search (`search`)
//! - New listings from JSON (`property add`)
//!
//! Results are printed to stdout as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lightbnb_db::{create_pool, DbConfig};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and update the LightBnB rental database",
    long_about = "Look up users, list reservations, search properties and add listings. \
                  Connection settings come from DATABASE_URL, LIGHTBNB_DB_* variables \
                  or ~/.lightbnb/config.toml."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// PostgreSQL connection string (overrides config file)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or upgrade the database schema
    Migrate,
    /// Look up or create users
    User(UserArgs),
    /// List a guest's reservations, earliest first
    Reservations(ReservationsArgs),
    /// Search properties, cheapest first
    Search(SearchArgs),
    /// Manage property listings
    Property(PropertyArgs),
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Find a user by email address
    Email {
        /// Email address to match exactly
        email: String,
    },
    /// Find a user by id
    Id {
        /// Numeric user id
        id: i32,
    },
    /// Create a user
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password (stored as given)
        #[arg(long)]
        password: String,
    },
}

#[derive(Args, Debug)]
pub struct ReservationsArgs {
    /// Guest user id
    pub guest_id: i32,

    /// Maximum reservations to return (default 10)
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-sensitive substring of the city
    #[arg(long)]
    pub city: Option<String>,

    /// Minimum nightly cost (only applied together with --max-price)
    #[arg(long)]
    pub min_price: Option<i32>,

    /// Maximum nightly cost (only applied together with --min-price)
    #[arg(long)]
    pub max_price: Option<i32>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum average review rating (0-5)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum properties to return (default 10)
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Add a listing from a JSON file
    Add {
        /// Path to a JSON document with the listing fields
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let mut config = DbConfig::load().context("Failed to load database configuration")?;
    if let Some(url) = cli.database_url {
        config.url = Some(url);
    }

    let pool = create_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => commands::migrate(&pool).await,
        Commands::User(args) => commands::user(&pool, args).await,
        Commands::Reservations(args) => commands::reservations(&pool, args).await,
        Commands::Search(args) => commands::search(&pool, args).await,
        Commands::Property(args) => commands::property(&pool, args).await,
    }
}
