//! SleepyHead CLI entry point.
//!
//! Binary name: `sleepyhead`
//!
//! Parses CLI arguments, initializes tracing, storage and the chat service
//! client, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use sleepyhead_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "sleepyhead", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.api_url.as_deref()).await?;

    let result = match cli.command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await,
        Commands::Journal { action } => {
            cli::journal::handle_journal_command(action, &state, cli.json).await
        }
        Commands::Sentiment { text } => cli::probe::sentiment(&state, &text, cli.json).await,
        Commands::Health => cli::probe::health(&state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
