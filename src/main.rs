mod commands;

use clap::Parser;
use sailwatch::cli::{Cli, Commands};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging with INFO level
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse command-line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve_cmd::execute(host, port).await?;
        }
        Commands::Instances { json } => {
            commands::instances_cmd::execute(json).await?;
        }
        Commands::Sign { payload } => {
            commands::sign_cmd::execute(&payload)?;
        }
    }

    Ok(())
}
