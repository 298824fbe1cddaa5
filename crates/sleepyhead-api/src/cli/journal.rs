//! Thought journal CLI subcommands.
//!
//! Each invocation loads the journal from local storage, runs one operation
//! and prints the resulting notice.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use console::style;
use dialoguer::{Confirm, Editor};
use tracing::info;

use sleepyhead_types::error::JournalError;

use crate::state::{AppState, ConcreteJournalStore};

use super::output::{print_cancelled, print_notice, spinner};

/// Journal subcommands.
#[derive(Subcommand)]
pub enum JournalCommand {
    /// Show the saved thought.
    Show,

    /// Write a new thought and save it. Opens $EDITOR when no text is given.
    Write {
        /// Thought text.
        text: Option<String>,
    },

    /// Save the given text, or re-save the current thought.
    Save {
        /// Thought text.
        text: Option<String>,
    },

    /// Export the thought to a timestamped text file.
    Export {
        /// Directory to write the file into (default: current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Clear the thought from storage.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Send the thought to the configured print command.
    Print,
}

/// Handle a journal subcommand.
pub async fn handle_journal_command(
    cmd: JournalCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    let mut journal = state.open_journal().await?;

    let result = match cmd {
        JournalCommand::Show => return show(&journal, json),
        JournalCommand::Write { text } => {
            let text = match text {
                Some(text) => Some(text),
                None => Editor::new()
                    .edit(journal.text())
                    .context("Failed to open editor")?,
            };
            match text {
                Some(text) => {
                    journal.set_text(text);
                    journal.save().await
                }
                None => {
                    return print_cancelled(json);
                }
            }
        }
        JournalCommand::Save { text } => {
            if let Some(text) = text {
                journal.set_text(text);
            }
            journal.save().await
        }
        JournalCommand::Export { out } => return export(&mut journal, out, json).await,
        JournalCommand::Clear { force } => {
            let ask = |prompt: &str| {
                force
                    || Confirm::new()
                        .with_prompt(prompt)
                        .default(false)
                        .interact()
                        .unwrap_or(false)
            };
            journal.clear(&ask).await
        }
        JournalCommand::Print => {
            let progress = (!json).then(|| spinner("Printing..."));
            let printed = journal.print(&state.printer).await;
            if let Some(progress) = progress {
                progress.finish_and_clear();
            }
            if printed.is_ok() && !json {
                println!(
                    "  {} Sent to '{}'",
                    style("✓").green().bold(),
                    state.printer.command()
                );
            }
            printed
        }
    };

    match result {
        Ok(()) | Err(JournalError::EmptyInput) => {
            if let Some(notice) = journal.notice() {
                print_notice(notice, json)?;
            }
            Ok(())
        }
        Err(JournalError::ConfirmationDeclined) => print_cancelled(json),
        Err(e) => {
            if let Some(notice) = journal.notice() {
                print_notice(notice, json)?;
            }
            Err(e.into())
        }
    }
}

fn show(journal: &ConcreteJournalStore, json: bool) -> Result<()> {
    if json {
        let result = serde_json::json!({
            "text": journal.text(),
            "characters": journal.char_count(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if journal.text().is_empty() {
        println!("  {}", style("No saved thought yet. Try: sleepyhead journal write").dim());
    } else {
        for line in journal.text().lines() {
            println!("  {line}");
        }
        println!();
        println!("  {}", style(format!("{} characters", journal.char_count())).dim());
    }
    println!();
    Ok(())
}

/// Render the export document and write it under `out`.
async fn export(
    journal: &mut ConcreteJournalStore,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let document = match journal.export(&Local::now()) {
        Ok(document) => document,
        Err(JournalError::EmptyInput) => {
            if let Some(notice) = journal.notice() {
                print_notice(notice, json)?;
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let path = out.unwrap_or_default().join(&document.file_name);
    tokio::fs::write(&path, &document.content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Journal exported");

    if json {
        let result = serde_json::json!({
            "notice": journal.notice(),
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if let Some(notice) = journal.notice() {
            print_notice(notice, false)?;
        }
        println!("    {}", style(path.display()).cyan());
    }
    Ok(())
}
