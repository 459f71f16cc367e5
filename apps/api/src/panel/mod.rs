//! Tool panels: prompt input plus the submit / loading / settle / reset cycle.
//!
//! A `Panel` is shared behind an `Arc` by whatever drives it. Its state sits
//! behind a mutex that is never held across the network call, and the
//! lifecycle admits one outstanding call at a time.

pub mod input;
pub mod lifecycle;
pub mod tool;

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::request::ToolRequest;
use crate::prompt_cache::PromptCache;
use crate::rate_limit::RateLimitExceeded;
use crate::render::{Render, View};
use crate::transport::{Transport, TransportError};

pub use input::PromptInput;
pub use lifecycle::{Lifecycle, RequestState, Ticket};
pub use tool::{CareerGuidanceTool, CareerSuggestor, ResourceFinder, RoadmapMaker, Tool};

/// What the user sees when a submission does not succeed. Messages are
/// user-facing; underlying causes are logged where they occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Network(String),

    #[error("You have reached the limit of {limit} messages per {window_secs} seconds. Please wait before sending more messages.")]
    RateLimited { limit: usize, window_secs: u64 },
}

impl From<RateLimitExceeded> for PanelError {
    fn from(e: RateLimitExceeded) -> Self {
        PanelError::RateLimited {
            limit: e.limit,
            window_secs: e.window_secs,
        }
    }
}

/// How a `submit` that did not error was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Answered by the backend.
    Fetched,
    /// Answered from the prompt cache; no call made.
    Cached,
    /// A call was already outstanding; nothing changed.
    Ignored,
    /// The call finished after a reset and its result was dropped.
    Discarded,
}

struct PanelInner<O> {
    input: PromptInput,
    lifecycle: Lifecycle<O>,
}

pub struct Panel<T: Tool> {
    transport: Arc<dyn Transport>,
    cache: Option<PromptCache>,
    timeout: Duration,
    inner: Mutex<PanelInner<T::Output>>,
    _tool: PhantomData<T>,
}

impl<T: Tool> Panel<T> {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            transport,
            cache: None,
            timeout,
            inner: Mutex::new(PanelInner {
                input: PromptInput::default(),
                lifecycle: Lifecycle::default(),
            }),
            _tool: PhantomData,
        }
    }

    /// Answers repeated prompts from `cache` and records fresh results in it.
    pub fn with_cache(mut self, cache: PromptCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn lock(&self) -> MutexGuard<'_, PanelInner<T::Output>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> RequestState<T::Output> {
        self.lock().lifecycle.state().clone()
    }

    pub fn input(&self) -> String {
        self.lock().input.text().to_string()
    }

    /// Rendered result, if the panel currently holds one.
    pub fn view(&self) -> Option<View> {
        self.lock().lifecycle.state().success().map(|output| output.render())
    }

    /// Submits `text`. Blank text fails validation without a call; a cached
    /// prompt is answered locally; otherwise exactly one call is made.
    pub async fn submit(&self, text: &str) -> Result<Submission, PanelError> {
        let ticket = {
            let mut inner = self.lock();
            if inner.lifecycle.is_loading() {
                debug!(tool = T::NAME, "submit ignored while loading");
                return Ok(Submission::Ignored);
            }

            inner.input.set(text);
            if let Err(e) = inner.input.validated(T::EMPTY_INPUT_MESSAGE) {
                inner.lifecycle.fail(e.clone());
                return Err(e);
            }

            if let Some(hit) = self.cached(text) {
                info!(tool = T::NAME, "answered from prompt cache");
                inner.lifecycle.succeed(hit);
                return Ok(Submission::Cached);
            }

            match inner.lifecycle.begin() {
                Some(ticket) => ticket,
                None => return Ok(Submission::Ignored),
            }
        };

        let outcome = self.fetch(text).await;

        let applied = self.lock().lifecycle.settle(ticket, outcome.clone());
        match outcome {
            Ok(_) if !applied => Ok(Submission::Discarded),
            Ok(_) => Ok(Submission::Fetched),
            Err(e) => Err(e),
        }
    }

    /// Clears input, result and error. Works from any state; an outstanding
    /// call is left to finish but its result is discarded.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.input.clear();
        inner.lifecycle.reset();
    }

    fn cached(&self, prompt: &str) -> Option<T::Output> {
        let raw = self.cache.as_ref()?.lookup(prompt)?;
        match serde_json::from_value(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(tool = T::NAME, "ignoring unreadable cache entry: {e}");
                None
            }
        }
    }

    async fn fetch(&self, text: &str) -> Result<T::Output, PanelError> {
        let failure = || PanelError::Network(T::FAILURE_MESSAGE.to_string());

        let body = serde_json::to_value(ToolRequest::new(text)).map_err(|e| {
            error!(tool = T::NAME, "could not encode request: {e}");
            failure()
        })?;

        let raw: Value =
            match tokio::time::timeout(self.timeout, self.transport.post_json(T::ENDPOINT, &body))
                .await
            {
                Ok(Ok(raw)) => raw,
                Ok(Err(e)) => {
                    error!(tool = T::NAME, endpoint = T::ENDPOINT, "request failed: {e}");
                    return Err(failure());
                }
                Err(_) => {
                    warn!(
                        tool = T::NAME,
                        timeout_secs = self.timeout.as_secs(),
                        "request timed out"
                    );
                    return Err(failure());
                }
            };

        let parsed = serde_json::from_value::<T::Output>(raw.clone()).map_err(|e| {
            error!(tool = T::NAME, "{}", TransportError::Decode(e));
            failure()
        })?;

        if let Some(cache) = &self.cache {
            cache.store(text, raw);
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::roadmap::RoadmapNode;
    use crate::transport::stub::StubTransport;

    const TIMEOUT: Duration = Duration::from_secs(60);

    fn recommendations() -> Value {
        json!({
            "careerRecommendations": [
                {"careerTitle": "Data Scientist", "description": "...", "whyRecommended": "..."}
            ]
        })
    }

    fn roadmap(name: &str) -> Value {
        json!({"name": name, "children": [{"name": "Basics"}]})
    }

    #[tokio::test]
    async fn test_blank_input_fails_without_network_call() {
        let transport = Arc::new(StubTransport::new().respond(recommendations()));
        let panel = Panel::<CareerSuggestor>::new(transport.clone(), TIMEOUT);

        let err = panel.submit("   ").await.unwrap_err();

        assert_eq!(
            err,
            PanelError::Validation("Please enter your interests.".to_string())
        );
        assert!(transport.calls().is_empty());
        assert_eq!(panel.state().error(), Some(&err));
    }

    #[tokio::test]
    async fn test_machine_learning_renders_one_card() {
        let transport = Arc::new(StubTransport::new().respond(recommendations()));
        let panel = Panel::<CareerSuggestor>::new(transport.clone(), TIMEOUT);

        assert_eq!(
            panel.submit("machine learning").await,
            Ok(Submission::Fetched)
        );

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/api/career-recommendations");
        assert_eq!(calls[0].1, json!({"frontendinput": "machine learning"}));

        let view = panel.view().unwrap();
        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Data Scientist");
    }

    #[tokio::test]
    async fn test_backend_error_maps_to_fixed_message() {
        let transport = Arc::new(StubTransport::new().fail_with_status(500));
        let panel = Panel::<CareerGuidanceTool>::new(transport, TIMEOUT);

        let err = panel.submit("doctor").await.unwrap_err();

        assert_eq!(err, PanelError::Network("Failed to fetch data.".to_string()));
        assert!(panel.view().is_none());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_network_error() {
        let transport = Arc::new(StubTransport::new().respond(json!({"groups": "nope"})));
        let panel = Panel::<ResourceFinder>::new(transport, TIMEOUT);

        assert_eq!(
            panel.submit("GATE").await,
            Err(PanelError::Network("Failed to fetch resources.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_resources_are_success_with_empty_state() {
        let transport =
            Arc::new(StubTransport::new().respond(json!({"groups": [], "materials": []})));
        let panel = Panel::<ResourceFinder>::new(transport, TIMEOUT);

        assert_eq!(panel.submit("obscure exam").await, Ok(Submission::Fetched));
        assert!(panel.state().error().is_none());
        assert!(panel.view().unwrap().is_empty_state());
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_from_success_and_error() {
        let transport = Arc::new(
            StubTransport::new()
                .respond(recommendations())
                .fail_with_status(502),
        );
        let panel = Panel::<CareerSuggestor>::new(transport, TIMEOUT);

        panel.submit("art").await.unwrap();
        panel.reset();
        assert!(panel.state().is_idle());
        assert_eq!(panel.input(), "");
        assert!(panel.view().is_none());

        panel.submit("music").await.unwrap_err();
        panel.reset();
        assert!(panel.state().is_idle());
        assert_eq!(panel.input(), "");
    }

    #[tokio::test]
    async fn test_roadmap_cache_hit_skips_network() {
        let transport = Arc::new(
            StubTransport::new()
                .respond(roadmap("Rust"))
                .respond(roadmap("Rust again")),
        );
        let cache = PromptCache::in_memory();
        let panel = Panel::<RoadmapMaker>::new(transport.clone(), TIMEOUT).with_cache(cache);

        assert_eq!(panel.submit("learn rust").await, Ok(Submission::Fetched));
        panel.reset();
        assert_eq!(panel.submit("learn rust").await, Ok(Submission::Cached));

        assert_eq!(transport.calls().len(), 1);
        match panel.state() {
            RequestState::Success(node) => assert_eq!(node.name, "Rust"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_whitespace_variant_is_a_cache_miss() {
        let transport = Arc::new(
            StubTransport::new()
                .respond(roadmap("Rust"))
                .respond(roadmap("Rust, spaced")),
        );
        let panel = Panel::<RoadmapMaker>::new(transport.clone(), TIMEOUT)
            .with_cache(PromptCache::in_memory());

        panel.submit("learn rust").await.unwrap();
        assert_eq!(panel.submit("learn rust ").await, Ok(Submission::Fetched));
        assert_eq!(transport.calls().len(), 2);
        assert_eq!(
            panel.state().success().map(|n: &RoadmapNode| n.name.clone()),
            Some("Rust, spaced".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let transport = Arc::new(
            StubTransport::new()
                .fail_with_status(500)
                .respond(roadmap("Go")),
        );
        let cache = PromptCache::in_memory();
        let panel =
            Panel::<RoadmapMaker>::new(transport.clone(), TIMEOUT).with_cache(cache.clone());

        panel.submit("learn go").await.unwrap_err();
        assert!(cache.lookup("learn go").is_none());

        assert_eq!(panel.submit("learn go").await, Ok(Submission::Fetched));
        assert!(cache.lookup("learn go").is_some());
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_ignored() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(StubTransport::gated(gate.clone()).respond(recommendations()));
        let panel = Arc::new(Panel::<CareerSuggestor>::new(transport.clone(), TIMEOUT));

        let first = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit("biology").await }
        });
        while !panel.state().is_loading() {
            tokio::task::yield_now().await;
        }

        assert_eq!(panel.submit("chemistry").await, Ok(Submission::Ignored));
        assert_eq!(panel.input(), "biology");

        gate.notify_one();
        assert_eq!(first.await.unwrap(), Ok(Submission::Fetched));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_while_loading_discards_result() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(StubTransport::gated(gate.clone()).respond(recommendations()));
        let panel = Arc::new(Panel::<CareerSuggestor>::new(transport, TIMEOUT));

        let pending = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit("history").await }
        });
        while !panel.state().is_loading() {
            tokio::task::yield_now().await;
        }

        panel.reset();
        gate.notify_one();

        assert_eq!(pending.await.unwrap(), Ok(Submission::Discarded));
        assert!(panel.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_call_times_out_into_error() {
        let transport = Arc::new(
            StubTransport::delayed(Duration::from_secs(600)).respond(recommendations()),
        );
        let panel = Panel::<CareerSuggestor>::new(transport, Duration::from_secs(5));

        let err = panel.submit("law").await.unwrap_err();

        assert!(matches!(err, PanelError::Network(_)));
        assert!(!panel.state().is_loading());
    }
}
