use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Per-call budget covering connect, send and body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound POST envelope handed to an [`HttpClient`].
///
/// Header names are stored lowercased so lookups in tests and fakes do not
/// depend on the casing used by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            body: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("authorization", format!("Bearer {token}"))
    }

    pub fn with_json_body(self, body: impl Into<String>) -> Self {
        self.with_header("content-type", "application/json")
            .with_body(body)
    }

    pub fn with_form_body(self, body: impl Into<String>) -> Self {
        self.with_header("content-type", "application/x-www-form-urlencoded")
            .with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Status and full body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Network-level failure; the request never produced a readable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("request timed out after {}ms: {message}", .timeout.as_millis())]
    Timeout { timeout: Duration, message: String },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Transport contract used by the keyword planner transport and the token
/// exchange. Implementations must be shareable across tasks.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production HTTP client backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(concat!("kwplan/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    /// Wrap a preconfigured `reqwest::Client` (proxies, custom TLS roots).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let timeout = request.timeout;
            let mut builder = self.client.post(&request.url).timeout(timeout);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.body(request.body).send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout {
                        timeout,
                        message: e.to_string(),
                    }
                } else if e.is_connect() {
                    HttpError::Connect(e.to_string())
                } else {
                    HttpError::Request(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            // The builder timeout also bounds the body read.
            let body = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout {
                        timeout,
                        message: e.to_string(),
                    }
                } else {
                    HttpError::Body(e.to_string())
                }
            })?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_populates_authorization_header() {
        let request = HttpRequest::post("https://example.test/v1").with_bearer_token("token-123");

        assert_eq!(request.header("Authorization"), Some("Bearer token-123"));
    }

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::post("https://example.test/v1")
            .with_header("Developer-Token", "dev");

        assert!(request.headers.contains_key("developer-token"));
        assert_eq!(request.header("DEVELOPER-TOKEN"), Some("dev"));
    }

    #[test]
    fn json_body_sets_content_type() {
        let request = HttpRequest::post("https://example.test/v1").with_json_body("{}");

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body, "{}");
    }

    #[test]
    fn requests_default_to_thirty_second_budget() {
        let request = HttpRequest::post("https://example.test/v1");
        assert_eq!(request.timeout, Duration::from_secs(30));
    }

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
