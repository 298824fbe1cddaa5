//! Terminal rendering for chat replies.
//!
//! Bot replies are markdown-ish prose rendered with `termimad`; the sentiment
//! of the latest exchange is shown as a dim footer.

use console::style;
use termimad::MadSkin;

use sleepyhead_types::chat::{Message, Role, SentimentResult};

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code.set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render a bot reply, indented under the speaker label.
    pub fn render_reply(&self, text: &str) -> String {
        let rendered = format!("{}", self.skin.term_text(text));
        let body = rendered
            .trim_end()
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n  {}\n{body}\n", style("SleepyHead").cyan().bold())
    }

    /// One line per message, user lines marked `You`, bot lines `SleepyHead`.
    pub fn render_history(&self, messages: &[Message]) -> String {
        let mut out = String::from("\n");
        for message in messages {
            let label = match message.role {
                Role::User => style("You").green().bold(),
                Role::Bot => style("SleepyHead").cyan().bold(),
            };
            out.push_str(&format!("  {label} {}\n", preview(&message.text, 100)));
        }
        out
    }

    pub fn render_sentiment_footer(&self, sentiment: &SentimentResult) -> String {
        format!("  {} {}\n", style("|").dim(), style(sentiment_line(sentiment)).dim())
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text sentiment summary: label, compound score and tone.
pub fn sentiment_line(sentiment: &SentimentResult) -> String {
    format!(
        "Sentiment: {} (Compound: {:.3}) Tone: {}",
        sentiment.classification, sentiment.compound_score, sentiment.tone
    )
}

/// Truncate to `max` characters, marking the cut with `...`.
fn preview(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}
