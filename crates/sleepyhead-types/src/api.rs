//! Wire types for the remote chat service.
//!
//! The service exposes three endpoints:
//! - `POST /api/chat`      -- [`ChatRequest`] -> [`ChatResponse`]
//! - `POST /api/sentiment` -- [`SentimentRequest`] -> [`SentimentPayload`]
//! - `GET  /health`        -- [`HealthStatus`]

use serde::{Deserialize, Serialize};

use crate::chat::{Message, SentimentResult};

/// Session identifier sent when none is configured.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Conversation as it stood before `message` was added.
    pub conversation_history: Vec<Message>,
    pub session_id: String,
}

/// Body returned by `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub sentiment: SentimentPayload,
}

/// Body of `POST /api/sentiment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

/// Sentiment object as the service sends it.
///
/// `/api/chat` names the label `classification`; `/api/sentiment` names it
/// `sentiment`. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPayload {
    #[serde(alias = "sentiment")]
    pub classification: String,
    pub scores: SentimentScores,
    pub tone: String,
}

/// Polarity scores. Only `compound` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub compound: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neg: Option<f64>,
}

impl From<SentimentPayload> for SentimentResult {
    fn from(payload: SentimentPayload) -> Self {
        Self {
            classification: payload.classification,
            compound_score: payload.scores.compound,
            tone: payload.tone,
        }
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    /// Status reported when the probe itself fails.
    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
