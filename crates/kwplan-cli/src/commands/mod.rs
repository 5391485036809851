mod credentials;
mod forecast;
mod historical;
mod ideas;

use std::sync::Arc;

use kwplan_core::{
    resolve_from_process, ClientOptions, ErrorPayload, KeywordPlannerClient, KeywordTools,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Text for stdout plus whether it is an `{"error": ...}` payload.
pub struct CommandOutput {
    pub text: String,
    pub failed: bool,
}

impl CommandOutput {
    pub fn success<T: Serialize>(value: &T, pretty: bool) -> Result<Self, CliError> {
        let text = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(Self {
            text,
            failed: false,
        })
    }

    pub fn from_tool_text(text: String) -> Self {
        let failed = ErrorPayload::from_text(&text).is_some();
        Self { text, failed }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Credentials => credentials::run(cli),
        Command::Ideas(args) => {
            let session = Session::connect(cli)?;
            ideas::run(args, &session.tools, &session.cancel).await
        }
        Command::Historical(args) => {
            let session = Session::connect(cli)?;
            historical::run(args, &session.tools, &session.cancel).await
        }
        Command::Forecast(args) => {
            let session = Session::connect(cli)?;
            forecast::run(args, &session.tools, &session.cancel).await
        }
    }
}

/// Tool surface for one API command. Dropping it stops the Ctrl-C watcher.
struct Session {
    tools: KeywordTools,
    cancel: CancellationToken,
}

impl Session {
    /// Fails fast on incomplete credentials, before any network call.
    fn connect(cli: &Cli) -> Result<Self, CliError> {
        let credentials = resolve_from_process(&cli.credentials.to_flags(), &cli.env_file);
        if !credentials.is_complete() {
            return Err(CliError::IncompleteCredentials {
                missing: credentials.missing_fields(),
            });
        }

        let options = ClientOptions::default().with_base_url(cli.base_url.as_str());
        let client = Arc::new(KeywordPlannerClient::new(&credentials, options));

        Ok(Self {
            tools: KeywordTools::new(client).with_pretty_output(cli.pretty),
            cancel: cancel_on_ctrl_c(),
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Token cancelled on Ctrl-C, or when the owning session is dropped.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = watcher.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    tracing::info!("interrupt received, cancelling request");
                    watcher.cancel();
                }
            }
        }
    });
    cancel
}

/// Trims each value and drops empties, so `--keywords "a, ,b"` yields `[a, b]`.
pub fn clean_keywords(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}
