//! Mock implementations for testing
//!
//! These mocks stand in for the providers and the reply sink so the
//! dispatcher and router can be exercised without network I/O.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService, Usage};
use crate::message::OutboundReply;
use crate::telegram::{ReplySink, TelegramError};
use crate::weather::{WeatherError, WeatherReport, WeatherService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Weather Service
// ============================================================================

/// Weather service that returns queued outcomes
pub struct MockWeatherService {
    outcomes: Mutex<VecDeque<Result<WeatherReport, WeatherError>>>,
    delay: Option<Duration>,
    /// Every city asked for, in order
    pub cities: Mutex<Vec<String>>,
    /// Notified when a lookup starts
    pub request_started: Arc<Notify>,
}

impl MockWeatherService {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            delay: None,
            cities: Mutex::new(Vec::new()),
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_report(&self, report: WeatherReport) {
        self.outcomes.lock().unwrap().push_back(Ok(report));
    }

    pub fn queue_error(&self, error: WeatherError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_cities(&self) -> Vec<String> {
        self.cities.lock().unwrap().clone()
    }

    pub async fn wait_for_request(&self) {
        self.request_started.notified().await;
    }
}

#[async_trait]
impl WeatherService for MockWeatherService {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        self.cities.lock().unwrap().push(city.to_string());
        self.request_started.notify_one();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WeatherError::network("No mock outcome queued")))
    }
}

// ============================================================================
// Mock LLM Service
// ============================================================================

/// LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    delay: Option<Duration>,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful response with the given text
    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(LlmResponse {
            text: text.into(),
            usage: Usage::default(),
        }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Recording Reply Sink
// ============================================================================

/// Reply sink that records every reply; can be told to fail
pub struct RecordingSink {
    pub replies: Mutex<Vec<OutboundReply>>,
    fail: bool,
    /// Notified after each delivery attempt
    pub delivered: Arc<Notify>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            fail: false,
            delivered: Arc::new(Notify::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn recorded(&self) -> Vec<OutboundReply> {
        self.replies.lock().unwrap().clone()
    }

    /// Wait until at least `count` replies were attempted, or the timeout passes
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.delivered.notified();
            if self.replies.lock().unwrap().len() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.replies.lock().unwrap().len() >= count;
            }
        }
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), TelegramError> {
        self.replies.lock().unwrap().push(reply.clone());
        self.delivered.notify_waiters();
        if self.fail {
            return Err(TelegramError::Api("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(())
    }
}
