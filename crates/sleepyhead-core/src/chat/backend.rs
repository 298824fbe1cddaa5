//! ChatBackend trait definition.
//!
//! The port to the remote chat/sentiment service. The HTTP implementation
//! lives in sleepyhead-infra (`HttpChatBackend`).

use sleepyhead_types::api::{ChatRequest, ChatResponse, HealthStatus, SentimentPayload};
use sleepyhead_types::error::ChatError;

/// Trait for the remote chat service.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatBackend: Send + Sync {
    /// Send a message plus prior history and receive the reply with its sentiment.
    fn send_message(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatResponse, ChatError>> + Send;

    /// Classify a piece of text without generating a reply.
    fn analyze_sentiment(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<SentimentPayload, ChatError>> + Send;

    /// Probe service liveness. Never fails: problems are reported as
    /// [`HealthStatus::unhealthy`].
    fn health(&self) -> impl std::future::Future<Output = HealthStatus> + Send;
}
