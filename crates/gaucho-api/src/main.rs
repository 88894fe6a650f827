//! GauchoChat opener CLI entry point.
//!
//! Binary name: `gaucho`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,gaucho=debug",
        _ => "trace",
    };
    gaucho_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "gaucho", &mut std::io::stdout());
        return Ok(());
    }

    let mut state = AppState::init().await?;

    let result = match cli.command {
        Commands::Opener(args) => cli::opener::opener(&mut state, args, cli.json, cli.quiet).await,
        Commands::Prompt { conversation } => cli::prompt::prompt(&state, conversation, cli.json).await,
        Commands::Report { input, output } => {
            cli::report::report(&input, &output, cli.json, cli.quiet).await
        }
        Commands::Completions { .. } => Ok(()),
    };

    gaucho_observe::tracing_setup::shutdown_tracing();
    result
}
