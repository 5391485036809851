use std::time::Duration;

use crate::http_client::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "https://googleads.googleapis.com/v23";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Endpoint and timeout settings for a [`KeywordPlannerClient`](crate::KeywordPlannerClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API root without trailing slash, e.g. `https://googleads.googleapis.com/v23`.
    pub base_url: String,
    pub token_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            token_url: String::from(DEFAULT_TOKEN_URL),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// `{base}/customers/{customer_id}:{method}`
    pub fn customer_endpoint(&self, customer_id: &str, method: &str) -> String {
        format!("{}/customers/{customer_id}:{method}", self.base_url)
    }
}
