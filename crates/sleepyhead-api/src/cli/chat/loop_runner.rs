//! Main chat loop orchestration.
//!
//! Reads lines, routes slash commands, and drives the session controller.
//! While a reply is pending the loop keeps reading input: extra lines are
//! rejected as busy and Ctrl+C cancels the request.

use std::io::Write;

use chrono::Utc;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use console::style;
use rustyline_async::SharedWriter;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use sleepyhead_core::chat::controller::{
    ChatSessionController, PendingRequest, RejectReason, SubmitOutcome,
};
use sleepyhead_core::mood::MoodLog;
use sleepyhead_types::api::ChatResponse;
use sleepyhead_types::error::ChatError;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Shown in place of the prompt while a reply is pending.
const PROCESSING_PROMPT: &str = "  Processing... ";

/// What the loop should do after handling a line.
enum Flow {
    Continue,
    Exit,
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut controller = state.new_chat_session();
    let mut moods = MoodLog::new();
    let renderer = ChatRenderer::new();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, mut out) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    print_welcome_banner(&mut out, &state.config.chat.base_url, &state.config.chat.session_id);
    if let Some(greeting) = controller.messages().first() {
        let _ = write!(out, "{}", renderer.render_reply(&greeting.text));
    }
    info!(base_url = %state.config.chat.base_url, "Chat session started");

    loop {
        match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                let hint = style("Press Ctrl+D to exit, or keep chatting.").dim();
                let _ = writeln!(out, "  {hint}");
            }
            InputEvent::Line(line) => {
                if let Some(cmd) = commands::parse(&line) {
                    let flow = run_command(
                        cmd,
                        &mut controller,
                        &mut moods,
                        &renderer,
                        &mut input,
                        &mut out,
                    );
                    match flow {
                        Flow::Continue => continue,
                        Flow::Exit => break,
                    }
                }

                let pending = match controller.begin_submit(&line) {
                    Ok(pending) => pending,
                    Err(RejectReason::Empty) => continue,
                    Err(RejectReason::Busy) => {
                        print_busy(&mut out);
                        continue;
                    }
                };

                let result =
                    await_reply(state, &mut controller, &pending, &mut input, &mut out).await;
                let outcome = controller.complete(pending, result);
                debug!(?outcome, state = ?controller.state(), "Chat exchange finished");

                if let Some(reply) = controller.messages().last() {
                    let _ = write!(out, "{}", renderer.render_reply(&reply.text));
                }
                if outcome == SubmitOutcome::Replied {
                    if let Some(sentiment) = controller.last_sentiment() {
                        let _ = write!(out, "{}", renderer.render_sentiment_footer(sentiment));
                    }
                }
                let _ = writeln!(out);
            }
        }
    }

    let _ = writeln!(out, "\n  {}", style("Session ended. Sleep well! 🌙").dim());
    input.flush();
    info!(messages = controller.messages().len(), "Chat session ended");
    Ok(())
}

/// Wait for the reply to `pending` while still servicing input.
///
/// Lines typed meanwhile go through `begin_submit` and are reported busy;
/// Ctrl+C or Ctrl+D cancels the request.
async fn await_reply(
    state: &AppState,
    controller: &mut ChatSessionController,
    pending: &PendingRequest,
    input: &mut ChatInput,
    out: &mut SharedWriter,
) -> Result<ChatResponse, ChatError> {
    let cancel = CancellationToken::new();
    let call = pending.dispatch(&*state.backend, controller.request_timeout(), &cancel);
    tokio::pin!(call);

    input.show_status(PROCESSING_PROMPT);
    let result = loop {
        tokio::select! {
            result = &mut call => break result,
            event = input.read_line() => match event {
                InputEvent::Line(line) => {
                    if let Err(RejectReason::Busy) = controller.begin_submit(&line) {
                        print_busy(out);
                    }
                }
                InputEvent::Interrupted | InputEvent::Eof => {
                    debug!("Pending chat request cancelled by user");
                    cancel.cancel();
                }
            },
        }
    };
    input.restore_prompt();
    result
}

fn print_busy(out: &mut SharedWriter) {
    let _ = writeln!(
        out,
        "  {} {}",
        style("!").yellow().bold(),
        style("Still waiting for a reply. Ctrl+C to cancel.").dim()
    );
}

fn run_command(
    cmd: ChatCommand,
    controller: &mut ChatSessionController,
    moods: &mut MoodLog,
    renderer: &ChatRenderer,
    input: &mut ChatInput,
    out: &mut SharedWriter,
) -> Flow {
    match cmd {
        ChatCommand::Help => commands::print_help(out),
        ChatCommand::Clear => input.clear(),
        ChatCommand::Exit => return Flow::Exit,
        ChatCommand::New => {
            controller.reset();
            let _ = writeln!(out, "\n  {} Started a new conversation.", style("*").cyan().bold());
            if let Some(greeting) = controller.messages().first() {
                let _ = write!(out, "{}", renderer.render_reply(&greeting.text));
            }
            let _ = writeln!(out);
        }
        ChatCommand::History => {
            let _ = write!(out, "{}", renderer.render_history(controller.messages()));
            let _ = writeln!(out);
        }
        ChatCommand::Sentiment => match controller.last_sentiment() {
            Some(sentiment) => {
                let _ = write!(out, "\n{}\n", renderer.render_sentiment_footer(sentiment));
            }
            None => {
                let hint = style("No sentiment yet. Say something first.").dim();
                let _ = writeln!(out, "\n  {hint}\n");
            }
        },
        ChatCommand::Mood(mood) => {
            moods.record(mood, Utc::now());
            let _ = writeln!(out, "\n  {} Mood recorded: {mood}\n", mood.emoji());
        }
        ChatCommand::Moods => {
            let _ = writeln!(out, "\n{}\n", mood_table(moods));
        }
        ChatCommand::Unknown(name) => {
            let _ = writeln!(
                out,
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
    }
    Flow::Continue
}

fn mood_table(moods: &MoodLog) -> String {
    if moods.is_empty() {
        return format!("  {}", style("No moods recorded yet. Try /mood happy").dim());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "MOOD", "RECORDED"]);

    for entry in moods.newest_first() {
        table.add_row(vec![
            entry.mood.emoji().to_string(),
            entry.mood.to_string(),
            entry
                .recorded_at
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string(),
        ]);
    }
    table.to_string()
}
