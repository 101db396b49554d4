//! Courtside CLI - migrations, seeding, and content backups.
//!
//! # Usage
//!
//! ```bash
//! # Create the kv schema
//! courtside migrate
//!
//! # Populate default content (no-op when content exists)
//! courtside seed
//!
//! # Back up every collection to a JSON file
//! courtside export --out backup.json
//!
//! # Restore collections from a backup
//! courtside import backup.json
//!
//! # Show dashboard summary numbers
//! courtside stats
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "courtside")]
#[command(author, version, about = "Courtside CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run key-value schema migrations
    Migrate,
    /// Populate default content when the store is empty
    Seed,
    /// Export every collection to a backup file
    Export {
        /// Where to write the backup document
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Import collections from a backup file
    Import {
        /// Backup document to read
        file: PathBuf,
    },
    /// Print dashboard summary numbers
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Export { out } => commands::data::export(&out).await?,
        Commands::Import { file } => commands::data::import(&file).await?,
        Commands::Stats => commands::data::stats().await?,
    }
    Ok(())
}
