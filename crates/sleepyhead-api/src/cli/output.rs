//! Shared terminal output helpers: notices and spinners.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use sleepyhead_types::notice::Notice;

/// Print a notice, styled by kind or as JSON.
pub fn print_notice(notice: &Notice, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notice)?);
    } else if notice.is_error() {
        println!("  {} {}", style("!").red().bold(), notice.message);
    } else {
        println!("  {} {}", style("✓").green().bold(), notice.message);
    }
    Ok(())
}

/// Report an operation the user backed out of.
pub fn print_cancelled(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&cancelled_json())?);
    } else {
        println!("  Cancelled.");
    }
    Ok(())
}

fn cancelled_json() -> serde_json::Value {
    serde_json::json!({ "cancelled": true })
}

/// Start a steady-ticking spinner with `message`.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(spinner_style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
