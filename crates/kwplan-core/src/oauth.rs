//! Bearer credential capability.
//!
//! The transport only asks a [`TokenSource`] for "a valid access token right
//! now". [`RefreshTokenSource`] performs the OAuth2 refresh-token grant and
//! caches the result; [`StaticTokenSource`] hands out a fixed token.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::TokenError;
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT};

/// Tokens are treated as expired this long before the provider says so.
const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Upper bound on how long a token stays cached, whatever `expires_in` says.
const MAX_CACHED_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Produces a bearer credential for each outbound call.
pub trait TokenSource: Send + Sync {
    fn access_token<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, TokenError>> + Send + 'a>>;

    /// Forgets any cached credential after the API rejected it.
    fn invalidate<'a>(&'a self) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async {})
    }
}

/// Always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenSource for StaticTokenSource {
    fn access_token<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, TokenError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.token.clone()) })
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_after: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// OAuth2 refresh-token grant with in-memory caching of the access token.
///
/// The cache lock is held across the exchange, so concurrent callers wait
/// for a single refresh instead of each starting their own.
pub struct RefreshTokenSource {
    http_client: Arc<dyn HttpClient>,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    timeout: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl RefreshTokenSource {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            timeout: DEFAULT_TIMEOUT,
            cached: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn exchange(&self) -> Result<CachedToken, TokenError> {
        let form = format!(
            "client_id={}&client_secret={}&refresh_token={}&grant_type=refresh_token",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.client_secret),
            urlencoding::encode(&self.refresh_token),
        );
        let request = HttpRequest::post(&self.token_url)
            .with_form_body(form)
            .with_timeout(self.timeout);

        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "OAuth2 token exchange rejected");
            return Err(TokenError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| TokenError::Parse(e.to_string()))?;
        if parsed.access_token.trim().is_empty() {
            return Err(TokenError::MissingAccessToken);
        }

        let lifetime = Duration::from_secs(parsed.expires_in)
            .min(MAX_CACHED_LIFETIME)
            .saturating_sub(EXPIRY_BUFFER);
        tracing::debug!(expires_in = parsed.expires_in, "obtained OAuth2 access token");

        let now = Instant::now();
        Ok(CachedToken {
            access_token: parsed.access_token,
            refresh_after: now.checked_add(lifetime).unwrap_or(now),
        })
    }
}

impl TokenSource for RefreshTokenSource {
    fn access_token<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, TokenError>> + Send + 'a>> {
        Box::pin(async move {
            let mut cached = self.cached.lock().await;
            if let Some(token) = cached.as_ref() {
                if Instant::now() < token.refresh_after {
                    return Ok(token.access_token.clone());
                }
            }

            let fresh = self.exchange().await?;
            let access_token = fresh.access_token.clone();
            *cached = Some(fresh);
            Ok(access_token)
        })
    }

    fn invalidate<'a>(&'a self) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            *self.cached.lock().await = None;
        })
    }
}

impl std::fmt::Debug for RefreshTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenSource")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::test_support::ScriptedHttpClient;

    fn source(client: Arc<ScriptedHttpClient>) -> RefreshTokenSource {
        RefreshTokenSource::new(
            client,
            "https://oauth.test/token",
            "client id",
            "s3cr3t&x",
            "refresh/token",
        )
    }

    #[tokio::test]
    async fn exchanges_refresh_token_with_form_encoded_body() {
        let client = Arc::new(ScriptedHttpClient::replying(
            200,
            r#"{"access_token":"ya29.fresh","expires_in":3600,"token_type":"Bearer"}"#,
        ));
        let tokens = source(client.clone());

        let token = tokens.access_token().await.expect("exchange should succeed");
        assert_eq!(token, "ya29.fresh");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://oauth.test/token");
        assert_eq!(
            requests[0].header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            requests[0].body,
            "client_id=client%20id&client_secret=s3cr3t%26x&refresh_token=refresh%2Ftoken&grant_type=refresh_token"
        );
    }

    #[tokio::test]
    async fn fresh_token_is_reused() {
        let client = Arc::new(ScriptedHttpClient::replying(
            200,
            r#"{"access_token":"ya29.cached","expires_in":3600}"#,
        ));
        let tokens = source(client.clone());

        tokens.access_token().await.expect("first call");
        tokens.access_token().await.expect("second call");

        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn token_inside_expiry_buffer_is_refreshed() {
        let client = Arc::new(ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json(r#"{"access_token":"short","expires_in":30}"#)),
            Ok(HttpResponse::ok_json(r#"{"access_token":"long","expires_in":3600}"#)),
        ]));
        let tokens = source(client.clone());

        assert_eq!(tokens.access_token().await.expect("first"), "short");
        assert_eq!(tokens.access_token().await.expect("second"), "long");
        assert_eq!(client.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn huge_expires_in_is_capped_instead_of_overflowing() {
        let client = Arc::new(ScriptedHttpClient::replying(
            200,
            r#"{"access_token":"t","expires_in":18446744073709551615}"#,
        ));
        let tokens = source(client.clone());

        assert_eq!(tokens.access_token().await.expect("first"), "t");
        assert_eq!(tokens.access_token().await.expect("cached"), "t");
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_exchange() {
        let client = Arc::new(
            ScriptedHttpClient::replying(200, r#"{"access_token":"shared","expires_in":3600}"#)
                .with_delay(Duration::from_millis(50)),
        );
        let tokens = source(client.clone());

        let (first, second) = tokio::join!(tokens.access_token(), tokens.access_token());

        assert_eq!(first.expect("first caller"), "shared");
        assert_eq!(second.expect("second caller"), "shared");
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_new_exchange() {
        let client = Arc::new(ScriptedHttpClient::replying(
            200,
            r#"{"access_token":"tok","expires_in":3600}"#,
        ));
        let tokens = source(client.clone());

        tokens.access_token().await.expect("first");
        tokens.invalidate().await;
        tokens.access_token().await.expect("second");

        assert_eq!(client.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn rejected_exchange_keeps_full_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#;
        let tokens = source(Arc::new(ScriptedHttpClient::replying(400, body)));

        let error = tokens.access_token().await.expect_err("should fail");
        assert_eq!(
            error,
            TokenError::Status {
                status: 400,
                body: body.to_string()
            }
        );
        assert!(error.to_string().contains("Token has been expired or revoked."));
    }

    #[tokio::test]
    async fn response_without_access_token_is_an_error() {
        let tokens = source(Arc::new(ScriptedHttpClient::replying(
            200,
            r#"{"expires_in":3600}"#,
        )));

        let error = tokens.access_token().await.expect_err("should fail");
        assert_eq!(error, TokenError::MissingAccessToken);
    }

    #[tokio::test]
    async fn unreachable_token_endpoint_surfaces_transport_error() {
        let tokens = source(Arc::new(ScriptedHttpClient::new(vec![Err(
            HttpError::Connect(String::from("dns failure")),
        )])));

        let error = tokens.access_token().await.expect_err("should fail");
        assert!(matches!(error, TokenError::Transport(HttpError::Connect(_))));
    }

    #[tokio::test]
    async fn static_source_returns_fixed_token() {
        let tokens = StaticTokenSource::new("fixed");
        assert_eq!(tokens.access_token().await.expect("static"), "fixed");
        tokens.invalidate().await;
        assert_eq!(tokens.access_token().await.expect("after invalidate"), "fixed");
    }
}
