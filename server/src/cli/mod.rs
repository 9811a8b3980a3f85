//! CLI module for inventory-server
//!
//! Provides command-line interface for running and preparing the server.

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Inventory server - SQLite-backed item inventory with an audit trail
#[derive(Parser, Debug)]
#[command(name = "inventory-server")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    INVENTORY_CONFIG          Path to a TOML configuration file
    INVENTORY_HOST            Bind address (default: 127.0.0.1, legacy: FLASK_HOST)
    INVENTORY_PORT            Listen port (default: 8000, legacy: FLASK_PORT)
    INVENTORY_DATABASE_URL    Database URL (default: sqlite://inventory.db)
    INVENTORY_LOG_LEVEL       Log level (default: info)
    INVENTORY_LOG_FORMAT      Log format: text or json (default: text)
    INVENTORY_LOG_DIR         Also write daily-rolling JSON logs to this directory
"#)]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the inventory server
    Serve(serve::ServeArgs),
    /// Create the database if needed, apply migrations and exit
    Migrate(migrate::MigrateArgs),
}
