//! northwind CLI - Northwind catalog HTTP service
//!
//! Entry point for the `northwind` binary. The only subcommand today is
//! `serve`, which starts the HTTP server over a SQLite Northwind database.

use anyhow::Result;
use clap::{Parser, Subcommand};
use northwind_server::server::ServerArgs;

mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "northwind",
    author,
    version,
    about = "Stateless JSON API over the classic Northwind product catalog"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(ServerArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => northwind_server::server::run_server(args).await,
    }
}
