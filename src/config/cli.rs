use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "book-catalog")]
#[command(about = "Synchronize book metadata and manage reviews")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override database.url from the configuration")]
    pub database_url: Option<String>,

    #[arg(long, global = true, help = "Override open_library.base_url from the configuration")]
    pub open_library_url: Option<String>,

    #[arg(
        long,
        global = true,
        conflicts_with = "database_url",
        help = "Use a throwaway in-memory database instead of database.url"
    )]
    pub in_memory: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Synchronize a single ISBN with Open Library
    Sync { isbn: String },
    /// Handle a raw synchronization message, e.g. '{"isbn":"9780134685991"}'
    SyncMessage { payload: String },
    /// Print review statistics per book
    Stats,
    /// List the reviews of a stored book, newest first
    Reviews { isbn: String },
    /// Check review text against the quality rules
    Verify { text: String },
    /// Add a review to a stored book
    Review {
        isbn: String,
        #[arg(long)]
        rating: i64,
        #[arg(long)]
        content: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
}
