//! HttpChatBackend -- concrete [`ChatBackend`] implementation over HTTP/JSON.
//!
//! Talks to the SleepyHead chat service:
//! - `POST {base}/api/chat`
//! - `POST {base}/api/sentiment`
//! - `GET  {base}/health`
//!
//! Non-2xx statuses and bodies that do not match the expected shape are
//! reported as [`ChatError`]s; the chat controller decides what the user sees.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use sleepyhead_core::chat::backend::ChatBackend;
use sleepyhead_types::api::{
    ChatRequest, ChatResponse, HealthStatus, SentimentPayload, SentimentRequest,
};
use sleepyhead_types::error::ChatError;

/// Chat service client.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds every HTTP call made by this client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status and decode the body of a response.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ChatError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                code: status.as_u16(),
                body: error_message(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(format!("failed to read response: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| ChatError::Decode(format!("failed to parse response: {e}")))
    }

    async fn fetch_health(&self) -> Result<HealthStatus, ChatError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("HTTP request failed: {e}")))?;

        Self::decode(response).await
    }
}

/// Pull the `error` field out of a JSON error body, or return the body as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

impl ChatBackend for HttpChatBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let url = self.url("/api/chat");
        debug!(%url, history_len = request.conversation_history.len(), "POST chat");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("HTTP request failed: {e}")))?;

        Self::decode(response).await
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentPayload, ChatError> {
        let url = self.url("/api/sentiment");
        let body = SentimentRequest {
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("HTTP request failed: {e}")))?;

        Self::decode(response).await
    }

    async fn health(&self) -> HealthStatus {
        match self.fetch_health().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Chat service health check failed");
                HealthStatus::unhealthy()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use sleepyhead_types::chat::Message;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn backend(base_url: &str) -> HttpChatBackend {
        HttpChatBackend::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn request(message: &str, history: Vec<Message>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            conversation_history: history,
            session_id: "default".to_string(),
        }
    }

    /// Replies with the received message and history length so the test can
    /// check what went over the wire.
    async fn echo_chat(Json(body): Json<Value>) -> Json<Value> {
        let history = body["conversation_history"].as_array().cloned().unwrap_or_default();
        Json(json!({
            "response": format!(
                "{} | {} | {}",
                body["message"].as_str().unwrap_or_default(),
                history.len(),
                body["session_id"].as_str().unwrap_or_default(),
            ),
            "sentiment": {
                "classification": "neutral",
                "scores": {"neg": 0.0, "neu": 1.0, "pos": 0.0, "compound": 0.0},
                "tone": "calm"
            }
        }))
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let base = serve(Router::new().route("/api/chat", post(echo_chat))).await;
        let client = backend(&base);

        let resp = client
            .send_message(&request(
                "I feel tired",
                vec![Message::bot("Hello!"), Message::user("hi"), Message::bot("hey")],
            ))
            .await
            .unwrap();

        assert_eq!(resp.response, "I feel tired | 3 | default");
        assert_eq!(resp.sentiment.classification, "neutral");
        assert_eq!(resp.sentiment.tone, "calm");
    }

    #[tokio::test]
    async fn test_history_wire_format() {
        async fn check(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
            let expected = json!([
                {"type": "bot", "text": "Hello!"},
                {"type": "user", "text": "hi"}
            ]);
            if body["conversation_history"] == expected {
                Ok(echo_chat(Json(body)).await)
            } else {
                Err((StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected history"}))))
            }
        }

        let base = serve(Router::new().route("/api/chat", post(check))).await;
        let client = backend(&base);

        let result = client
            .send_message(&request("again", vec![Message::bot("Hello!"), Message::user("hi")]))
            .await;
        assert!(result.is_ok(), "history was not sent as type/text objects: {result:?}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "model not loaded"})),
                )
            }),
        );
        let base = serve(router).await;

        let err = backend(&base)
            .send_message(&request("hello", vec![]))
            .await
            .unwrap_err();

        match err {
            ChatError::Status { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body, "model not loaded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({"reply": "wrong field"})) }),
        );
        let base = serve(router).await;

        let err = backend(&base)
            .send_message(&request("hello", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind and immediately release a port so nothing is listening on it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = backend(&format!("http://{addr}"));
        let err = client.send_message(&request("hello", vec![])).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));

        let health = client.health().await;
        assert_eq!(health, HealthStatus::unhealthy());
    }

    #[tokio::test]
    async fn test_analyze_sentiment() {
        let router = Router::new().route(
            "/api/sentiment",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["text"], "what a lovely day");
                Json(json!({
                    "sentiment": "positive",
                    "scores": {"neg": 0.0, "neu": 0.4, "pos": 0.6, "compound": 0.59},
                    "tone": "very_positive"
                }))
            }),
        );
        let base = serve(router).await;

        let payload = backend(&base).analyze_sentiment("what a lovely day").await.unwrap();
        assert_eq!(payload.classification, "positive");
        assert_eq!(payload.tone, "very_positive");
        assert_eq!(payload.scores.pos, Some(0.6));
    }

    #[tokio::test]
    async fn test_health() {
        let router = Router::new().route(
            "/health",
            get(|| async {
                Json(json!({"status": "healthy", "message": "SleepyHead backend is running"}))
            }),
        );
        let base = serve(router).await;

        let health = backend(&format!("{base}/")).health().await;
        assert!(health.is_healthy());
        assert_eq!(health.message.as_deref(), Some("SleepyHead backend is running"));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error": "Message is required"}"#), "Message is required");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
