//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and never reach the chat service.

use std::io::Write;

use console::style;

use sleepyhead_types::mood::Mood;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Discard the conversation and start over.
    New,
    /// Show the conversation so far.
    History,
    /// Show the sentiment of the last reply.
    Sentiment,
    /// Record a mood.
    Mood(Mood),
    /// List recorded moods.
    Moods,
    /// Unknown or malformed command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" => ChatCommand::New,
        "/history" => ChatCommand::History,
        "/sentiment" => ChatCommand::Sentiment,
        "/moods" => ChatCommand::Moods,
        "/mood" => match arg.parse::<Mood>() {
            Ok(mood) => ChatCommand::Mood(mood),
            Err(_) => ChatCommand::Unknown("/mood requires happy, neutral or sad".to_string()),
        },
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help(out: &mut impl Write) {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
        ("/new", "Start over with a fresh conversation"),
        ("/history", "Show the conversation so far"),
        ("/sentiment", "Show the sentiment of the last reply"),
        ("/mood <m>", "Record how you feel (happy, neutral, sad)"),
        ("/moods", "Show your recorded moods"),
    ];

    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", style("Available commands:").bold());
    let _ = writeln!(out);
    for (name, description) in rows {
        let _ = writeln!(out, "  {:<12} {}", style(name).cyan(), description);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}",
        style("Ctrl+C cancels a pending reply, Ctrl+D exits").dim()
    );
    let _ = writeln!(out);
}
