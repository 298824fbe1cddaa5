//! Welcome banner display for chat sessions.

use std::io::Write;

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows which chat service the session talks to and how to get help.
pub fn print_welcome_banner(out: &mut impl Write, base_url: &str, session_id: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "  🌙 {}", style("SleepyHead").cyan().bold());
    let _ = writeln!(
        out,
        "  {}",
        style("Your AI companion for better sleep and wellness").dim()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}  {}", style("Service:").bold(), style(base_url).dim());
    let _ = writeln!(out, "  {}  {}", style("Session:").bold(), style(session_id).dim());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    let _ = writeln!(out, "  {}", style("---").dim());
    let _ = writeln!(out);
}
