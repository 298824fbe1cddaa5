//! Chat message and sentiment types for SleepyHead.
//!
//! A conversation is an ordered, append-only list of [`Message`]s exchanged
//! between the user and the bot. The most recent [`SentimentResult`] returned
//! by the chat service is kept alongside it.

use serde::{Deserialize, Serialize};

/// Greeting seeded as the first bot message of every session.
pub const GREETING: &str = "Hello! I'm SleepyHead, your AI companion. How can I help you today?";

/// Reply appended when the chat service cannot be reached or answers badly.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting. Please make sure the backend server is running.";

/// Author of a chat message.
///
/// Serialized as `"user"` / `"bot"`, matching the `type` field the chat
/// service expects in `conversation_history`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// A single chat message.
///
/// The wire form is `{"type": "user"|"bot", "text": "..."}`, so a slice of
/// messages serializes directly into the service's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }
}

/// Sentiment of the most recent exchange, as computed by the chat service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Classification label (e.g. "positive", "neutral", "negative").
    pub classification: String,
    /// Compound polarity score in `[-1.0, 1.0]`.
    pub compound_score: f64,
    /// Response tone label chosen by the service (e.g. "very_negative", "calm").
    pub tone: String,
}
