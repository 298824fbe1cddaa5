//! Print adapter that pipes documents into a system command (`lp` by default).

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use sleepyhead_core::journal::ports::Printer;
use sleepyhead_types::error::PrintError;

/// Sends documents to a print command on stdin.
///
/// The command line is split on whitespace: the first word is the program,
/// the rest are its arguments (e.g. `"lp -d office"`).
#[derive(Debug, Clone)]
pub struct CommandPrinter {
    command: String,
}

impl CommandPrinter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Printer for CommandPrinter {
    async fn print(&self, document: &str) -> Result<(), PrintError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or_else(|| PrintError::Launch {
            command: self.command.clone(),
            reason: "empty print command".to_string(),
        })?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| PrintError::Launch {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        // A command that exits without reading stdin surfaces through its
        // exit status below, so the write error is only reported on success.
        let mut write_result = Ok(());
        if let Some(mut stdin) = child.stdin.take() {
            write_result = stdin.write_all(document.as_bytes()).await;
        }

        let status = child.wait().await.map_err(|e| PrintError::Launch {
            command: self.command.clone(),
            reason: e.to_string(),
        })?;

        if !status.success() {
            warn!(command = %self.command, ?status, "Print command failed");
            return Err(PrintError::Failed {
                command: self.command.clone(),
                status: status.code().unwrap_or(-1),
            });
        }

        write_result.map_err(|e| PrintError::Launch {
            command: self.command.clone(),
            reason: e.to_string(),
        })?;

        debug!(command = %self.command, bytes = document.len(), "Document sent to printer");
        Ok(())
    }
}
