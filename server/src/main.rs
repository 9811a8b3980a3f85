//! Inventory Server Entry Point

use clap::Parser;
use inventory_server::cli::{migrate, serve, Cli, Commands};
use inventory_server::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Migrate(args)) => migrate::execute(&args).await,
        Some(Commands::Serve(args)) => serve::execute(&args).await,
        None => {
            let args = serve::ServeArgs {
                config: std::env::var_os("INVENTORY_CONFIG").map(Into::into),
                ..Default::default()
            };
            serve::execute(&args).await
        }
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
