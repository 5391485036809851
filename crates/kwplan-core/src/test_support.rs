//! Fakes shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Replays queued outcomes in order; the last one repeats once the queue is
/// down to a single entry. Every request is recorded.
#[derive(Debug)]
pub struct ScriptedHttpClient {
    outcomes: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Option<Duration>,
}

impl ScriptedHttpClient {
    pub fn new(outcomes: Vec<Result<HttpResponse, HttpError>>) -> Self {
        assert!(!outcomes.is_empty(), "script needs at least one outcome");
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Each reply resolves only after `delay` has elapsed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn replying(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(status, body))])
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);

        let mut outcomes = self
            .outcomes
            .lock()
            .expect("script should not be poisoned");
        let outcome = if outcomes.len() > 1 {
            outcomes.pop_front().expect("queue is non-empty")
        } else {
            outcomes.front().cloned().expect("queue is non-empty")
        };

        let delay = self.delay;
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            outcome
        })
    }
}
