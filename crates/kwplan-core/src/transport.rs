//! Authenticated JSON POST against the Ads API.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::KeywordPlannerError;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, DEFAULT_TIMEOUT};
use crate::oauth::TokenSource;

pub const DEVELOPER_TOKEN_HEADER: &str = "developer-token";
pub const LOGIN_CUSTOMER_ID_HEADER: &str = "login-customer-id";

/// Executes one call per `post`; nothing is retried or cached. A 401 drops
/// the cached access token so the next call exchanges a new one.
#[derive(Clone)]
pub struct AdsTransport {
    http_client: Arc<dyn HttpClient>,
    tokens: Arc<dyn TokenSource>,
    developer_token: String,
    login_customer_id: Option<String>,
    timeout: Duration,
}

impl AdsTransport {
    /// An empty `login_customer_id` means the header is never sent.
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        tokens: Arc<dyn TokenSource>,
        developer_token: impl Into<String>,
        login_customer_id: Option<&str>,
    ) -> Self {
        Self {
            http_client,
            tokens,
            developer_token: developer_token.into(),
            login_customer_id: login_customer_id
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn post<B, R>(
        &self,
        endpoint: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<R, KeywordPlannerError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_string(body).map_err(KeywordPlannerError::Serialize)?;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(endpoint, "keyword planner call cancelled");
                return Err(KeywordPlannerError::Cancelled);
            }
            result = self.send(endpoint, payload) => result?,
        };

        if response.status != 200 {
            tracing::warn!(
                endpoint,
                status = response.status,
                body_len = response.body.len(),
                "keyword planner call rejected"
            );
            if response.status == 401 {
                self.tokens.invalidate().await;
            }
            return Err(KeywordPlannerError::Status {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(KeywordPlannerError::Parse)
    }

    async fn send(
        &self,
        endpoint: &str,
        payload: String,
    ) -> Result<HttpResponse, KeywordPlannerError> {
        let access_token = self.tokens.access_token().await?;

        let mut request = HttpRequest::post(endpoint)
            .with_json_body(payload)
            .with_header(DEVELOPER_TOKEN_HEADER, &self.developer_token)
            .with_bearer_token(&access_token)
            .with_timeout(self.timeout);
        if let Some(login_customer_id) = &self.login_customer_id {
            request = request.with_header(LOGIN_CUSTOMER_ID_HEADER, login_customer_id);
        }

        tracing::debug!(endpoint, "posting keyword planner request");
        let response = self.http_client.execute(request).await?;
        Ok(response)
    }
}

impl fmt::Debug for AdsTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdsTransport")
            .field("login_customer_id", &self.login_customer_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
