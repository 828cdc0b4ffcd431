//! Asynchronous hyphenation boundary.
//!
//! Requests carry a correlation id and are answered in completion order on a
//! response channel. Every request gets a response: any failure (unknown
//! language, oversized input, a panic inside the engine) becomes a degraded
//! response that returns the original text with zero counts and an error.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use softhyphen_engine::config::MAX_INPUT_BYTES;
use softhyphen_engine::{
    hyphenate, HeuristicDetector, HyphenationOptions, HyphenationResult, LanguageDetector,
    LanguageRegistry, OutputEncoding, RuleLookup,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::cache::RuleCache;
use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};
use crate::store::RuleSource;

/// Language id that asks the worker to detect the language.
pub const AUTO_LANGUAGE: &str = "auto";

fn auto_language() -> String {
    AUTO_LANGUAGE.to_string()
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRequest {
    /// Caller-chosen correlation id; a fresh UUID when omitted
    #[serde(default = "new_request_id")]
    pub id: String,
    pub text: String,
    /// Registered language id or [`AUTO_LANGUAGE`]
    #[serde(default = "auto_language")]
    pub language_id: String,
    #[serde(default)]
    pub encoding: OutputEncoding,
    #[serde(default)]
    pub html_mode: bool,
}

impl WorkerRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_request_id(),
            text: text.into(),
            language_id: auto_language(),
            encoding: OutputEncoding::default(),
            html_mode: false,
        }
    }

    pub fn with_language(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = language_id.into();
        self
    }

    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_html_mode(mut self, html_mode: bool) -> Self {
        self.html_mode = html_mode;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub id: String,
    pub result: HyphenationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkerResponse {
    fn degraded(request: &WorkerRequest, language: &str, error: &WorkerError) -> Self {
        Self {
            id: request.id.clone(),
            result: HyphenationResult::unmodified(
                &request.text,
                language,
                request.encoding,
                request.html_mode,
            ),
            error: Some(error.to_string()),
        }
    }

    /// Answer a request line that failed to parse but still names its id.
    ///
    /// Returns `None` when no string or numeric `id` can be read from the
    /// line, in which case nobody is waiting for an answer.
    pub fn for_malformed(line: &str, error: &serde_json::Error) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(line).ok()?;
        let id = match value.get("id")? {
            serde_json::Value::String(id) => id.clone(),
            serde_json::Value::Number(id) => id.to_string(),
            _ => return None,
        };
        let text = value.get("text").and_then(|v| v.as_str()).unwrap_or_default();
        let language = value
            .get("languageId")
            .and_then(|v| v.as_str())
            .unwrap_or(AUTO_LANGUAGE);

        Some(Self {
            id,
            result: HyphenationResult::unmodified(
                text,
                language,
                OutputEncoding::default(),
                false,
            ),
            error: Some(format!("malformed request: {error}")),
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Answer one request synchronously.
///
/// Never fails: errors and panics are turned into a degraded response.
pub fn handle_request(
    request: &WorkerRequest,
    registry: &LanguageRegistry,
    rules: &dyn RuleLookup,
    detector: &dyn LanguageDetector,
) -> WorkerResponse {
    if request.text.len() > MAX_INPUT_BYTES {
        let error = WorkerError::InputTooLarge {
            size: request.text.len(),
            limit: MAX_INPUT_BYTES,
        };
        tracing::warn!(id = %request.id, error = %error, "rejecting request");
        return WorkerResponse::degraded(request, &request.language_id, &error);
    }

    let language_id = if request.language_id.eq_ignore_ascii_case(AUTO_LANGUAGE) {
        let detection = detector.detect(&request.text);
        tracing::debug!(
            id = %request.id,
            language = %detection.language,
            confidence = detection.confidence,
            "detected language"
        );
        detection.language
    } else {
        request.language_id.clone()
    };

    match run_hyphenation(request, &language_id, registry, rules) {
        Ok(result) => WorkerResponse {
            id: request.id.clone(),
            result,
            error: None,
        },
        Err(error) => {
            if matches!(error, WorkerError::Panicked(_)) {
                tracing::error!(id = %request.id, error = %error, "hyphenation panicked");
            } else {
                tracing::warn!(id = %request.id, error = %error, "hyphenation failed");
            }
            WorkerResponse::degraded(request, &language_id, &error)
        }
    }
}

fn run_hyphenation(
    request: &WorkerRequest,
    language_id: &str,
    registry: &LanguageRegistry,
    rules: &dyn RuleLookup,
) -> Result<HyphenationResult> {
    let options = HyphenationOptions::for_language(registry, language_id)?
        .with_encoding(request.encoding)
        .with_html_mode(request.html_mode);

    catch_unwind(AssertUnwindSafe(|| hyphenate(&request.text, &options, rules)))
        .map_err(|payload| WorkerError::Panicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

struct WorkerContext {
    registry: Arc<LanguageRegistry>,
    source: Arc<dyn RuleSource>,
    cache: Arc<RuleCache>,
}

/// Sending side of a running worker.
#[derive(Clone)]
pub struct WorkerHandle {
    requests: mpsc::Sender<WorkerRequest>,
    cache: Arc<RuleCache>,
    shutdown: CancellationToken,
}

impl WorkerHandle {
    /// Queue a request. Returns its correlation id.
    pub async fn submit(&self, request: WorkerRequest) -> Result<String> {
        let id = request.id.clone();
        self.requests
            .send(request)
            .await
            .map_err(|_| WorkerError::ChannelClosed)?;
        Ok(id)
    }

    pub fn cache(&self) -> &Arc<RuleCache> {
        &self.cache
    }

    /// Make the next request refetch rules, e.g. after an admin edit.
    pub fn invalidate_rules(&self) {
        self.cache.invalidate();
    }

    /// Stop the worker after the request in flight.
    ///
    /// The response channel closes once the worker has stopped.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.requests.is_closed()
    }
}

/// Start a worker task.
///
/// The rule cache is preloaded from `source` before the first request is
/// taken. Responses arrive on the returned receiver, which yields `None`
/// once the worker has stopped.
pub fn spawn_worker(
    config: &WorkerConfig,
    registry: Arc<LanguageRegistry>,
    source: Arc<dyn RuleSource>,
) -> (WorkerHandle, mpsc::Receiver<WorkerResponse>) {
    let capacity = config.queue_capacity.max(1);
    let (request_tx, request_rx) = mpsc::channel(capacity);
    let (response_tx, response_rx) = mpsc::channel(capacity);

    let cache = Arc::new(RuleCache::new(config.cache_ttl));
    let shutdown = CancellationToken::new();

    let context = WorkerContext {
        registry,
        source,
        cache: Arc::clone(&cache),
    };
    tokio::spawn(run_worker(
        context,
        request_rx,
        response_tx,
        shutdown.clone(),
    ));

    let handle = WorkerHandle {
        requests: request_tx,
        cache,
        shutdown,
    };
    (handle, response_rx)
}

async fn run_worker(
    context: WorkerContext,
    mut requests: mpsc::Receiver<WorkerRequest>,
    responses: mpsc::Sender<WorkerResponse>,
    shutdown: CancellationToken,
) {
    context.cache.force_refresh(context.source.as_ref()).await;

    tracing::info!(
        languages = ?context.registry.ids(),
        cache_ttl = ?context.cache.ttl(),
        "starting hyphenation worker"
    );

    loop {
        let request = tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                tracing::info!("shutdown requested, stopping worker");
                break;
            }
            request = requests.recv() => match request {
                Some(request) => request,
                None => {
                    tracing::info!("request channel closed, stopping worker");
                    break;
                }
            },
        };

        // Outside select!: an accepted request always runs to completion
        context
            .cache
            .refresh_if_stale(context.source.as_ref())
            .await;
        let response = process_request(&context, request).await;

        if responses.send(response).await.is_err() {
            tracing::info!("response receiver dropped, stopping worker");
            break;
        }
    }
}

async fn process_request(context: &WorkerContext, request: WorkerRequest) -> WorkerResponse {
    let request = Arc::new(request);
    let job = Arc::clone(&request);
    let registry = Arc::clone(&context.registry);
    let rules = context.cache.snapshot();

    let outcome = tokio::task::spawn_blocking(move || {
        handle_request(&job, &registry, rules.as_ref(), &HeuristicDetector)
    })
    .await;

    match outcome {
        Ok(response) => response,
        Err(e) => {
            let error = WorkerError::Panicked(e.to_string());
            tracing::error!(id = %request.id, error = %error, "hyphenation task failed");
            WorkerResponse::degraded(&request, &request.language_id, &error)
        }
    }
}

/// Keeps only the response for the most recently submitted request.
///
/// Callers that resubmit on every edit record each new id with
/// [`expect`](Self::expect); responses to older ids are discarded.
#[derive(Debug, Default)]
pub struct LatestResponse {
    expected: Option<String>,
    latest: Option<WorkerResponse>,
}

impl LatestResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id of the newest submission.
    pub fn expect(&mut self, id: impl Into<String>) {
        self.expected = Some(id.into());
    }

    /// Offer a response. Returns `true` if it answers the newest submission.
    pub fn accept(&mut self, response: WorkerResponse) -> bool {
        if self.expected.as_deref() != Some(response.id.as_str()) {
            tracing::debug!(id = %response.id, "discarding superseded response");
            return false;
        }
        self.latest = Some(response);
        true
    }

    /// The newest submission has not been answered yet.
    pub fn is_pending(&self) -> bool {
        match (&self.expected, &self.latest) {
            (Some(expected), Some(latest)) => latest.id != *expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn latest(&self) -> Option<&WorkerResponse> {
        self.latest.as_ref()
    }

    pub fn take(&mut self) -> Option<WorkerResponse> {
        self.latest.take()
    }
}
