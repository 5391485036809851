use thiserror::Error;

use crate::http_client::HttpError;

/// Failure of a single keyword planner call.
///
/// Every variant is returned to the immediate caller; nothing is retried.
#[derive(Debug, Error)]
pub enum KeywordPlannerError {
    #[error("marshalling request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("obtaining access token: {0}")]
    Auth(#[from] TokenError),

    #[error("executing request: {0}")]
    Transport(#[from] HttpError),

    /// Non-200 reply. `body` is kept verbatim; provider diagnostics (quota,
    /// permission, malformed field) only appear there.
    #[error("Google Ads API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("parsing response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("request cancelled by caller")]
    Cancelled,
}

impl KeywordPlannerError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport(HttpError::Timeout { .. })
                | Self::Auth(TokenError::Transport(HttpError::Timeout { .. }))
        )
    }
}

/// Failure to mint a bearer credential from the refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token endpoint unreachable: {0}")]
    Transport(#[from] HttpError),

    #[error("OAuth2 token exchange failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("OAuth2 token response could not be parsed: {0}")]
    Parse(String),

    #[error("OAuth2 token response did not include an access_token")]
    MissingAccessToken,
}
