//! Chat session controller.
//!
//! Owns the in-memory conversation, the pending flag, and the last sentiment
//! result. A session is a two-state machine:
//!
//! ```text
//! Idle --begin_submit(valid text)--> Awaiting --complete(ok | err)--> Idle
//! ```
//!
//! `begin_submit` while `Awaiting` (or with blank text) is rejected and
//! leaves the state untouched. Every backend call is bounded by a timeout and
//! can be cancelled; both end in the same fallback reply as a network error.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sleepyhead_types::api::{ChatRequest, ChatResponse};
use sleepyhead_types::chat::{FALLBACK_REPLY, GREETING, Message, SentimentResult};
use sleepyhead_types::error::ChatError;

use super::backend::ChatBackend;

/// Observable state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting,
}

/// Why a submission was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The text was empty after trimming.
    Empty,
    /// A request is already in flight.
    Busy,
}

/// Result of a submission, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service replied; the reply was appended.
    Replied,
    /// The request failed; the fallback reply was appended.
    Fallback,
    /// Nothing was sent and nothing changed.
    Rejected(RejectReason),
}

/// An in-flight request handed out by [`ChatSessionController::begin_submit`].
///
/// Only the controller can create one, so `complete` can only be called for
/// a request that was actually dispatched.
#[derive(Debug)]
pub struct PendingRequest {
    request: ChatRequest,
}

impl PendingRequest {
    /// The request body to send to the chat service.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Send the request, bounded by `timeout` and abandoned when `cancel` fires.
    ///
    /// Does not touch the session; hand the result to
    /// [`ChatSessionController::complete`].
    pub async fn dispatch<B: ChatBackend>(
        &self,
        backend: &B,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<ChatResponse, ChatError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ChatError::Cancelled),
            res = tokio::time::timeout(timeout, backend.send_message(&self.request)) => {
                match res {
                    Ok(inner) => inner,
                    Err(_) => Err(ChatError::Timeout(timeout.as_secs())),
                }
            }
        }
    }
}

/// Manages the state of a single chat session.
#[derive(Debug)]
pub struct ChatSessionController {
    messages: Vec<Message>,
    pending: bool,
    last_sentiment: Option<SentimentResult>,
    session_id: String,
    request_timeout: Duration,
}

impl ChatSessionController {
    /// Create a session seeded with the bot greeting.
    pub fn new(session_id: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
            pending: false,
            last_sentiment: None,
            session_id: session_id.into(),
            request_timeout,
        }
    }

    /// Messages in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        if self.pending {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }

    pub fn last_sentiment(&self) -> Option<&SentimentResult> {
        self.last_sentiment.as_ref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Guard, append the user message, and build the request.
    ///
    /// The history in the request is the conversation as it stood *before*
    /// the new user message was appended.
    pub fn begin_submit(&mut self, text: &str) -> Result<PendingRequest, RejectReason> {
        if text.trim().is_empty() {
            return Err(RejectReason::Empty);
        }
        if self.pending {
            return Err(RejectReason::Busy);
        }

        let conversation_history = self.messages.clone();
        self.messages.push(Message::user(text));
        self.pending = true;

        debug!(
            history_len = conversation_history.len(),
            "Dispatching chat request"
        );

        Ok(PendingRequest {
            request: ChatRequest {
                message: text.to_string(),
                conversation_history,
                session_id: self.session_id.clone(),
            },
        })
    }

    /// Apply the outcome of a dispatched request and return to `Idle`.
    ///
    /// On failure the fallback reply is appended and the previous sentiment
    /// is kept.
    pub fn complete(
        &mut self,
        pending: PendingRequest,
        result: Result<ChatResponse, ChatError>,
    ) -> SubmitOutcome {
        drop(pending);
        self.pending = false;

        match result {
            Ok(response) => {
                self.messages.push(Message::bot(response.response));
                self.last_sentiment = Some(response.sentiment.into());
                debug!(messages = self.messages.len(), "Chat reply received");
                SubmitOutcome::Replied
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed, using fallback reply");
                self.messages.push(Message::bot(FALLBACK_REPLY));
                SubmitOutcome::Fallback
            }
        }
    }

    /// Submit `text` to the backend and wait for the reply.
    ///
    /// The wait is bounded by the request timeout and ends early when
    /// `cancel` fires; either way the fallback path is taken.
    pub async fn submit<B: ChatBackend>(
        &mut self,
        backend: &B,
        text: &str,
        cancel: &CancellationToken,
    ) -> SubmitOutcome {
        let pending = match self.begin_submit(text) {
            Ok(pending) => pending,
            Err(reason) => {
                debug!(?reason, "Chat submission rejected");
                return SubmitOutcome::Rejected(reason);
            }
        };

        let result = pending.dispatch(backend, self.request_timeout, cancel).await;
        self.complete(pending, result)
    }

    /// Discard the conversation and start over from the greeting.
    pub fn reset(&mut self) {
        self.messages = vec![Message::bot(GREETING)];
        self.pending = false;
        self.last_sentiment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    use sleepyhead_types::api::{HealthStatus, SentimentPayload, SentimentScores};
    use sleepyhead_types::chat::Role;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    fn reply(text: &str, classification: &str, compound: f64, tone: &str) -> ChatResponse {
        ChatResponse {
            response: text.to_string(),
            sentiment: SentimentPayload {
                classification: classification.to_string(),
                scores: SentimentScores {
                    compound,
                    pos: None,
                    neu: None,
                    neg: None,
                },
                tone: tone.to_string(),
            },
        }
    }

    /// Backend that replays scripted results and records every request.
    struct ScriptedBackend {
        results: Mutex<VecDeque<Result<ChatResponse, ChatError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn new(results: Vec<Result<ChatResponse, ChatError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn send_message(
            &self,
            request: &ChatRequest,
        ) -> impl Future<Output = Result<ChatResponse, ChatError>> + Send {
            self.requests.lock().unwrap().push(request.clone());
            let next = self
                .results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ChatError::Transport("script exhausted".to_string())));
            async move { next }
        }

        fn analyze_sentiment(
            &self,
            _text: &str,
        ) -> impl Future<Output = Result<SentimentPayload, ChatError>> + Send {
            async { Err(ChatError::Transport("unused".to_string())) }
        }

        fn health(&self) -> impl Future<Output = HealthStatus> + Send {
            async { HealthStatus::unhealthy() }
        }
    }

    /// Backend that never answers.
    struct HungBackend;

    impl ChatBackend for HungBackend {
        fn send_message(
            &self,
            _request: &ChatRequest,
        ) -> impl Future<Output = Result<ChatResponse, ChatError>> + Send {
            std::future::pending()
        }

        fn analyze_sentiment(
            &self,
            _text: &str,
        ) -> impl Future<Output = Result<SentimentPayload, ChatError>> + Send {
            std::future::pending()
        }

        fn health(&self) -> impl Future<Output = HealthStatus> + Send {
            std::future::pending()
        }
    }

    fn controller() -> ChatSessionController {
        ChatSessionController::new("default", REQUEST_TIMEOUT)
    }

    #[test]
    fn test_new_session_is_seeded() {
        let ctl = controller();
        assert_eq!(ctl.messages(), &[Message::bot(GREETING)]);
        assert_eq!(ctl.state(), SessionState::Idle);
        assert!(ctl.last_sentiment().is_none());
    }

    #[test]
    fn test_begin_submit_appends_user_message_and_awaits() {
        let mut ctl = controller();
        let pending = ctl.begin_submit("I feel tired").unwrap();

        assert_eq!(ctl.state(), SessionState::Awaiting);
        assert_eq!(ctl.messages().len(), 2);
        assert_eq!(ctl.messages()[1], Message::user("I feel tired"));

        // History excludes the message being sent.
        assert_eq!(pending.request().message, "I feel tired");
        assert_eq!(pending.request().conversation_history, vec![Message::bot(GREETING)]);
        assert_eq!(pending.request().session_id, "default");
    }

    #[test]
    fn test_blank_submissions_are_rejected() {
        let mut ctl = controller();
        for text in ["", "   ", "\n\t"] {
            assert_eq!(ctl.begin_submit(text).unwrap_err(), RejectReason::Empty);
        }
        assert_eq!(ctl.messages().len(), 1);
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[test]
    fn test_submit_while_awaiting_is_rejected() {
        let mut ctl = controller();
        let _pending = ctl.begin_submit("first").unwrap();

        assert_eq!(ctl.begin_submit("second").unwrap_err(), RejectReason::Busy);
        assert_eq!(ctl.messages().len(), 2);
        assert_eq!(ctl.state(), SessionState::Awaiting);
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let mut ctl = controller();
        let pending = ctl.begin_submit("  spaced out  ").unwrap();
        assert_eq!(ctl.messages()[1].text, "  spaced out  ");
        assert_eq!(pending.request().message, "  spaced out  ");
    }

    #[test]
    fn test_complete_failure_keeps_previous_sentiment() {
        let mut ctl = controller();
        let pending = ctl.begin_submit("hello").unwrap();
        ctl.complete(pending, Ok(reply("hi!", "positive", 0.6, "very_positive")));
        let before = ctl.last_sentiment().cloned();

        let pending = ctl.begin_submit("still there?").unwrap();
        let failure = ChatError::Status {
            code: 500,
            body: String::new(),
        };
        let outcome = ctl.complete(pending, Err(failure));

        assert_eq!(outcome, SubmitOutcome::Fallback);
        assert_eq!(ctl.messages().len(), 5);
        assert_eq!(ctl.messages()[4], Message::bot(FALLBACK_REPLY));
        assert_eq!(ctl.last_sentiment().cloned(), before);
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_end_to_end() {
        let backend = ScriptedBackend::new(vec![Ok(reply("Tell me more", "neutral", 0.0, "calm"))]);
        let mut ctl = controller();

        let outcome = ctl
            .submit(&backend, "I feel tired", &CancellationToken::new())
            .await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(
            ctl.messages(),
            &[
                Message::bot(GREETING),
                Message::user("I feel tired"),
                Message::bot("Tell me more"),
            ]
        );
        assert_eq!(ctl.state(), SessionState::Idle);
        let sentiment = ctl.last_sentiment().unwrap();
        assert_eq!(sentiment.classification, "neutral");
        assert_eq!(sentiment.tone, "calm");
    }

    #[tokio::test]
    async fn test_history_accumulates_across_submits() {
        let backend = ScriptedBackend::new(vec![
            Ok(reply("one", "neutral", 0.0, "neutral")),
            Err(ChatError::Decode("bad json".to_string())),
            Ok(reply("three", "neutral", 0.0, "neutral")),
        ]);
        let mut ctl = controller();
        let cancel = CancellationToken::new();

        ctl.submit(&backend, "a", &cancel).await;
        ctl.submit(&backend, "b", &cancel).await;
        ctl.submit(&backend, "c", &cancel).await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].conversation_history, ctl.messages()[..1].to_vec());
        assert_eq!(requests[1].conversation_history, ctl.messages()[..3].to_vec());
        assert_eq!(requests[2].conversation_history, ctl.messages()[..5].to_vec());
        assert_eq!(ctl.messages().len(), 7);
        assert_eq!(ctl.messages()[4].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_rejected_submit_does_not_call_backend() {
        let backend = ScriptedBackend::new(vec![]);
        let mut ctl = controller();

        let outcome = ctl.submit(&backend, "   ", &CancellationToken::new()).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::Empty));
        assert!(backend.requests().is_empty());
        assert_eq!(ctl.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_takes_fallback_path() {
        let mut ctl = ChatSessionController::new("default", Duration::from_millis(20));

        let outcome = ctl.submit(&HungBackend, "hello?", &CancellationToken::new()).await;

        assert_eq!(outcome, SubmitOutcome::Fallback);
        assert_eq!(ctl.messages().last().unwrap().text, FALLBACK_REPLY);
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_cancellation_takes_fallback_path() {
        let mut ctl = controller();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = ctl.submit(&HungBackend, "hello?", &cancel).await;

        assert_eq!(outcome, SubmitOutcome::Fallback);
        assert_eq!(ctl.messages().len(), 3);
        assert_eq!(ctl.messages()[2].role, Role::Bot);
    }

    #[tokio::test]
    async fn test_input_during_dispatch_is_busy() {
        let backend = ScriptedBackend::new(vec![Ok(reply("Rest well.", "neutral", 0.0, "calm"))]);
        let mut ctl = controller();
        let cancel = CancellationToken::new();

        let pending = ctl.begin_submit("I can't sleep").unwrap();
        let call = pending.dispatch(&backend, REQUEST_TIMEOUT, &cancel);
        assert_eq!(ctl.begin_submit("hello?").unwrap_err(), RejectReason::Busy);
        let result = call.await;

        assert_eq!(ctl.complete(pending, result), SubmitOutcome::Replied);
        assert_eq!(backend.requests().len(), 1);
        assert_eq!(ctl.messages().len(), 3);
        assert_eq!(ctl.messages()[2].text, "Rest well.");
    }

    #[test]
    fn test_reset() {
        let mut ctl = controller();
        let pending = ctl.begin_submit("hello").unwrap();
        ctl.complete(pending, Ok(reply("hi", "positive", 0.3, "positive")));

        ctl.reset();
        assert_eq!(ctl.messages(), &[Message::bot(GREETING)]);
        assert!(ctl.last_sentiment().is_none());
        assert_eq!(ctl.state(), SessionState::Idle);
    }
}
