//! One-shot calls to the chat service: health and sentiment.

use anyhow::Result;
use console::style;

use sleepyhead_core::chat::backend::ChatBackend;
use sleepyhead_types::chat::SentimentResult;

use crate::state::AppState;

use super::chat::renderer::sentiment_line;
use super::output::spinner;

/// Report whether the chat service is reachable.
///
/// Always succeeds; an unreachable service is reported, not raised.
pub async fn health(state: &AppState, json: bool) -> Result<()> {
    let progress = (!json).then(|| spinner("Checking chat service..."));
    let status = state.backend.health().await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    if status.is_healthy() {
        println!(
            "  {} Chat service at {} is {}",
            style("✓").green().bold(),
            style(state.backend.base_url()).cyan(),
            style(&status.status).green()
        );
    } else {
        println!(
            "  {} Chat service at {} is {}",
            style("!").red().bold(),
            style(state.backend.base_url()).cyan(),
            style(&status.status).red()
        );
    }
    if let Some(message) = &status.message {
        println!("    {}", style(message).dim());
    }
    println!();
    Ok(())
}

/// Classify the sentiment of `text` with the chat service.
pub async fn sentiment(state: &AppState, text: &str, json: bool) -> Result<()> {
    let progress = (!json).then(|| spinner("Analyzing..."));
    let result = state.backend.analyze_sentiment(text).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let payload = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let summary = SentimentResult::from(payload);
    println!();
    println!("  {}", sentiment_line(&summary));
    println!();
    Ok(())
}
