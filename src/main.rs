//! amoblock - Add-on Blocklist Staging Tool
//!
//! Command-line workflow assistant for Mozilla add-on blocklist curation.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use amoblock::cli::{Cli, Commands};
use amoblock::commands::stage::StageOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Check { input } => amoblock::commands::check::run(&input, &cli.config).await,
        Commands::Stage {
            input,
            name,
            reason,
            bug,
            severity,
            min_version,
            max_version,
            staged,
            dry_run,
        } => {
            amoblock::commands::stage::run(
                &input,
                name,
                reason,
                bug,
                severity,
                min_version,
                max_version,
                StageOptions {
                    include_unsigned: staged,
                    dry_run,
                },
                &cli.config,
            )
            .await
        }
        Commands::List { limit } => amoblock::commands::list::run(limit, &cli.config).await,
        Commands::Status => amoblock::commands::status::run(&cli.config).await,
        Commands::Collection { action } => {
            amoblock::commands::collection::run(action, &cli.config).await
        }
        Commands::Expand { pattern } => amoblock::commands::expand::run(&pattern),
        Commands::Version => {
            println!("amoblock {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
