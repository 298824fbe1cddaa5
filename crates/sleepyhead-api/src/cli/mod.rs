//! CLI command definitions and dispatch for the `sleepyhead` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod journal;
pub mod output;
pub mod probe;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// SleepyHead: your AI companion for better sleep and wellness.
#[derive(Parser)]
#[command(name = "sleepyhead", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Chat service base URL (overrides config.toml and SLEEPYHEAD_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session with SleepyHead.
    Chat,

    /// Write, save, export, print, or clear your thought journal.
    Journal {
        #[command(subcommand)]
        action: journal::JournalCommand,
    },

    /// Ask the chat service to classify the sentiment of a text.
    Sentiment {
        /// Text to analyze.
        text: String,
    },

    /// Check whether the chat service is reachable.
    Health,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
