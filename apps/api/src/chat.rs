//! Counselling chat: an append-only transcript, a per-session sliding-window
//! limit on outgoing messages, and the same request lifecycle the tool
//! panels use.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::models::chat::{ChatMessage, ChatReply, ChatRequest, Sender};
use crate::panel::{Lifecycle, PanelError, RequestState};
use crate::rate_limit::SlidingWindowLimiter;
use crate::transport::Transport;

pub const CHAT_ENDPOINT: &str = "/api/counseling-chatbot";
pub const CHAT_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";
pub const CHAT_EMPTY_MESSAGE: &str = "Please enter a message.";

/// Milliseconds since the Unix epoch. Injectable for tests.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

fn system_clock() -> Clock {
    Arc::new(|| Utc::now().timestamp_millis())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// The reply bubble that was appended.
    Replied(ChatMessage),
    /// A message was already in flight; nothing was sent.
    Ignored,
}

struct ChatInner {
    messages: Vec<ChatMessage>,
    limiter: SlidingWindowLimiter,
    lifecycle: Lifecycle<String>,
}

pub struct ChatSession {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    clock: Clock,
    inner: Mutex<ChatInner>,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            clock: system_clock(),
            inner: Mutex::new(ChatInner {
                messages: Vec::new(),
                limiter: SlidingWindowLimiter::default(),
                lifecycle: Lifecycle::default(),
            }),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_limiter(self, limiter: SlidingWindowLimiter) -> Self {
        self.lock().limiter = limiter;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ChatInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages.clone()
    }

    pub fn state(&self) -> RequestState<String> {
        self.lock().lifecycle.state().clone()
    }

    /// Sends left in the current window.
    pub fn remaining_sends(&self) -> usize {
        let now = (self.clock)();
        self.lock().limiter.remaining(now.max(0) as u64)
    }

    /// Clears the last result or error. The transcript is kept.
    pub fn reset(&self) {
        self.lock().lifecycle.reset();
    }

    /// Sends `text` to the counsellor.
    ///
    /// Blank text and rate-limited sends are rejected before anything is
    /// appended or sent. A failed call still appends an AI bubble carrying
    /// the fixed error text.
    pub async fn send(&self, text: &str) -> Result<ChatOutcome, PanelError> {
        let (ticket, request) = {
            let mut inner = self.lock();
            if inner.lifecycle.is_loading() {
                debug!("chat send ignored while loading");
                return Ok(ChatOutcome::Ignored);
            }

            if text.trim().is_empty() {
                let e = PanelError::Validation(CHAT_EMPTY_MESSAGE.to_string());
                inner.lifecycle.fail(e.clone());
                return Err(e);
            }

            let now = (self.clock)();
            if let Err(limited) = inner.limiter.try_consume(now.max(0) as u64) {
                warn!("{limited}");
                let e = PanelError::from(limited);
                inner.lifecycle.fail(e.clone());
                return Err(e);
            }

            // History is the transcript before this message.
            let request = ChatRequest {
                user_input: text.to_string(),
                chat_history: format_history(&inner.messages),
            };
            inner.messages.push(ChatMessage {
                id: now,
                text: text.to_string(),
                sender: Sender::User,
            });

            match inner.lifecycle.begin() {
                Some(ticket) => (ticket, request),
                None => return Ok(ChatOutcome::Ignored),
            }
        };

        let outcome = self.exchange(&request).await;

        let reply = ChatMessage {
            id: (self.clock)(),
            text: match &outcome {
                Ok(text) => text.clone(),
                Err(_) => CHAT_FAILURE_MESSAGE.to_string(),
            },
            sender: Sender::Ai,
        };

        let mut inner = self.lock();
        inner.messages.push(reply.clone());
        inner.lifecycle.settle(ticket, outcome.clone());
        outcome.map(|_| ChatOutcome::Replied(reply))
    }

    async fn exchange(&self, request: &ChatRequest) -> Result<String, PanelError> {
        let failure = || PanelError::Network(CHAT_FAILURE_MESSAGE.to_string());

        let body = serde_json::to_value(request).map_err(|e| {
            error!("could not encode chat request: {e}");
            failure()
        })?;

        let raw = match tokio::time::timeout(
            self.timeout,
            self.transport.post_json(CHAT_ENDPOINT, &body),
        )
        .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                error!("Error communicating with chatbot: {e}");
                return Err(failure());
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "chat request timed out");
                return Err(failure());
            }
        };

        let reply: ChatReply = serde_json::from_value(raw).map_err(|e| {
            error!("chat reply had unexpected shape: {e}");
            failure()
        })?;
        info!(reply_len = reply.response.len(), "chat reply received");
        Ok(reply.response)
    }
}

/// `user: …` / `ai(you): …`, one line per message.
pub fn format_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.sender.history_label(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}
