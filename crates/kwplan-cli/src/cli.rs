//! CLI argument definitions for kwplan.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ideas` | Generate keyword ideas from seed keywords and/or a URL |
//! | `historical` | Fetch historical search metrics for keywords |
//! | `forecast` | Forecast clicks, impressions and cost for keywords |
//! | `credentials` | Report which credentials are configured |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--env-file` | `.env` | Dotfile consulted after the environment |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//! | `--base-url` | `https://googleads.googleapis.com/v23` | API root |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! Credential flags (`--developer-token`, `--client-id`, `--client-secret`,
//! `--refresh-token`, `--customer-id`, `--login-customer-id`) win over the
//! matching `GOOGLE_ADS_*` environment variables and dotfile entries.
//!
//! # Examples
//!
//! ```bash
//! kwplan ideas --keywords "rust,tokio" --url https://tokio.rs
//! kwplan historical --keywords axum --keywords actix --pretty
//! kwplan forecast --keywords "rust jobs" --max-cpc-micros 2500000 --forecast-days 14
//! kwplan credentials
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kwplan_core::{CredentialField, CredentialFlags, DEFAULT_BASE_URL, DEFAULT_DOTENV_FILE};

/// Google Ads Keyword Planner from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "kwplan",
    author,
    version,
    about = "Google Ads Keyword Planner client",
    long_about = "kwplan generates keyword ideas, historical metrics and forecasts through the \
Google Ads Keyword Planner API.\n\
\n\
Credentials are resolved per field from flags, then GOOGLE_ADS_* environment \
variables, then the dotfile.\n\
\n\
Use 'kwplan <command> --help' for command-specific help."
)]
pub struct Cli {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Dotfile with GOOGLE_ADS_* entries. A missing file is ignored.
    #[arg(long, global = true, default_value = DEFAULT_DOTENV_FILE)]
    pub env_file: PathBuf,

    /// Log filter (e.g. `debug`, `kwplan_core=trace`). `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// API root, without trailing slash.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Explicit credential values.
#[derive(Args)]
pub struct CredentialArgs {
    /// Google Ads developer token.
    #[arg(long, global = true)]
    pub developer_token: Option<String>,

    /// OAuth2 client ID.
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret.
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// OAuth2 refresh token.
    #[arg(long, global = true)]
    pub refresh_token: Option<String>,

    /// Customer account ID; dashes are allowed.
    #[arg(long, global = true)]
    pub customer_id: Option<String>,

    /// Manager account ID used to access the customer.
    #[arg(long, global = true)]
    pub login_customer_id: Option<String>,
}

impl CredentialArgs {
    pub fn to_flags(&self) -> CredentialFlags {
        CredentialFlags {
            developer_token: self.developer_token.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: self.refresh_token.clone(),
            customer_id: self.customer_id.clone(),
            login_customer_id: self.login_customer_id.clone(),
        }
    }
}

impl std::fmt::Debug for CredentialArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flags = self.to_flags();
        let set = CredentialField::ALL
            .into_iter()
            .filter(|field| flags.get(*field).is_some())
            .map(CredentialField::as_str)
            .collect::<Vec<_>>();
        f.debug_struct("CredentialArgs").field("set", &set).finish()
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate keyword ideas.
    ///
    /// Seeds may be keywords, a URL, or both.
    ///
    /// # Examples
    ///
    ///   kwplan ideas --keywords "rust,tokio"
    ///   kwplan ideas --url https://www.rust-lang.org
    ///   kwplan ideas --keywords rust --url https://www.rust-lang.org --language languageConstants/1000
    Ideas(IdeasArgs),

    /// Fetch historical search metrics.
    ///
    /// # Examples
    ///
    ///   kwplan historical --keywords "rust book,rust course"
    Historical(HistoricalArgs),

    /// Forecast keyword performance at a manual max CPC.
    ///
    /// # Examples
    ///
    ///   kwplan forecast --keywords "rust jobs" --max-cpc-micros 2000000
    Forecast(ForecastArgs),

    /// Report credential completeness. Values are never printed.
    Credentials,
}

/// Arguments for the `ideas` command.
#[derive(Debug, Args)]
pub struct IdeasArgs {
    /// Seed keywords, repeated or comma-separated.
    #[arg(long = "keywords", value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Seed URL.
    #[arg(long, default_value = "")]
    pub url: String,

    /// Language resource name, e.g. `languageConstants/1000` for English.
    #[arg(long, default_value = "")]
    pub language: String,
}

/// Arguments for the `historical` command.
#[derive(Debug, Args)]
pub struct HistoricalArgs {
    /// Keywords, repeated or comma-separated.
    #[arg(long = "keywords", value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,
}

/// Arguments for the `forecast` command.
#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Keywords, repeated or comma-separated.
    #[arg(long = "keywords", value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,

    /// Maximum cost per click in micros (1,000,000 = one currency unit).
    #[arg(long, default_value_t = 1_000_000)]
    pub max_cpc_micros: i64,

    /// Forecast length in days; zero or negative means 30.
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    pub forecast_days: i32,
}
