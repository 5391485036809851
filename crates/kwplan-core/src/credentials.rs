//! Credential resolution.
//!
//! Every field is resolved on its own, from the highest-priority non-empty
//! source:
//!
//! | Priority | Source |
//! |----------|--------|
//! | 1 | explicit flag value |
//! | 2 | environment variable |
//! | 3 | dotfile entry under the same variable name |
//! | 4 | empty string |
//!
//! A configuration may therefore mix sources, e.g. the developer token from
//! a flag and the refresh token from the dotfile.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

use crate::dotenv::DotEnv;

pub const ENV_DEVELOPER_TOKEN: &str = "GOOGLE_ADS_DEVELOPER_TOKEN";
pub const ENV_CLIENT_ID: &str = "GOOGLE_ADS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GOOGLE_ADS_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "GOOGLE_ADS_REFRESH_TOKEN";
pub const ENV_CUSTOMER_ID: &str = "GOOGLE_ADS_CUSTOMER_ID";
pub const ENV_LOGIN_CUSTOMER_ID: &str = "GOOGLE_ADS_LOGIN_CUSTOMER_ID";

/// One credential slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    DeveloperToken,
    ClientId,
    ClientSecret,
    RefreshToken,
    CustomerId,
    LoginCustomerId,
}

impl CredentialField {
    pub const ALL: [Self; 6] = [
        Self::DeveloperToken,
        Self::ClientId,
        Self::ClientSecret,
        Self::RefreshToken,
        Self::CustomerId,
        Self::LoginCustomerId,
    ];

    pub const REQUIRED: [Self; 5] = [
        Self::DeveloperToken,
        Self::ClientId,
        Self::ClientSecret,
        Self::RefreshToken,
        Self::CustomerId,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeveloperToken => "developer token",
            Self::ClientId => "client ID",
            Self::ClientSecret => "client secret",
            Self::RefreshToken => "refresh token",
            Self::CustomerId => "customer ID",
            Self::LoginCustomerId => "login customer ID",
        }
    }

    /// Environment variable name, also used as the dotfile key.
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::DeveloperToken => ENV_DEVELOPER_TOKEN,
            Self::ClientId => ENV_CLIENT_ID,
            Self::ClientSecret => ENV_CLIENT_SECRET,
            Self::RefreshToken => ENV_REFRESH_TOKEN,
            Self::CustomerId => ENV_CUSTOMER_ID,
            Self::LoginCustomerId => ENV_LOGIN_CUSTOMER_ID,
        }
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, Self::LoginCustomerId)
    }

    const fn is_customer_id(self) -> bool {
        matches!(self, Self::CustomerId | Self::LoginCustomerId)
    }
}

impl Display for CredentialField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which source satisfied a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Flag,
    Environment,
    Dotfile,
    Unset,
}

impl CredentialSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Environment => "environment",
            Self::Dotfile => "dotfile",
            Self::Unset => "unset",
        }
    }
}

/// Values supplied explicitly on the command line. `None` and `Some("")`
/// both mean "not given".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialFlags {
    pub developer_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub customer_id: Option<String>,
    pub login_customer_id: Option<String>,
}

impl CredentialFlags {
    pub fn get(&self, field: CredentialField) -> Option<&str> {
        let value = match field {
            CredentialField::DeveloperToken => &self.developer_token,
            CredentialField::ClientId => &self.client_id,
            CredentialField::ClientSecret => &self.client_secret,
            CredentialField::RefreshToken => &self.refresh_token,
            CredentialField::CustomerId => &self.customer_id,
            CredentialField::LoginCustomerId => &self.login_customer_id,
        };
        value.as_deref()
    }
}

impl Debug for CredentialFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for field in CredentialField::ALL {
            map.entry(&field.as_str(), &self.get(field).map(|_| "<set>"));
        }
        map.finish()
    }
}

/// Read access to environment variables.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Receives one record per field describing where its value came from.
/// Values themselves are never passed to the sink.
pub trait ResolutionSink {
    fn record(&self, field: CredentialField, source: CredentialSource);
}

/// Emits a `tracing` debug event per resolved field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ResolutionSink for TracingSink {
    fn record(&self, field: CredentialField, source: CredentialSource) {
        tracing::debug!(
            field = field.as_str(),
            env = field.env_var(),
            source = source.as_str(),
            "credential resolved"
        );
    }
}

/// Effective credentials. Customer ids are stored without dashes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    pub developer_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub customer_id: String,
    /// Manager account id; empty when the customer is accessed directly.
    pub login_customer_id: String,
}

impl CredentialSet {
    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::DeveloperToken => &self.developer_token,
            CredentialField::ClientId => &self.client_id,
            CredentialField::ClientSecret => &self.client_secret,
            CredentialField::RefreshToken => &self.refresh_token,
            CredentialField::CustomerId => &self.customer_id,
            CredentialField::LoginCustomerId => &self.login_customer_id,
        }
    }

    fn slot(&mut self, field: CredentialField) -> &mut String {
        match field {
            CredentialField::DeveloperToken => &mut self.developer_token,
            CredentialField::ClientId => &mut self.client_id,
            CredentialField::ClientSecret => &mut self.client_secret,
            CredentialField::RefreshToken => &mut self.refresh_token,
            CredentialField::CustomerId => &mut self.customer_id,
            CredentialField::LoginCustomerId => &mut self.login_customer_id,
        }
    }

    /// True when every required field is non-empty. The login customer id
    /// never counts.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<CredentialField> {
        CredentialField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn login_customer_id(&self) -> Option<&str> {
        Some(self.login_customer_id.as_str()).filter(|id| !id.is_empty())
    }
}

impl Debug for CredentialSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                ""
            } else {
                "<redacted>"
            }
        }

        f.debug_struct("CredentialSet")
            .field("developer_token", &redact(&self.developer_token))
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("customer_id", &self.customer_id)
            .field("login_customer_id", &self.login_customer_id)
            .finish()
    }
}

/// Strips dashes: `123-456-7890` becomes `1234567890`. Idempotent.
pub fn normalize_customer_id(id: &str) -> String {
    id.replace('-', "")
}

/// Resolves every field from flags, then `env`, then `dotfile`.
pub fn resolve(
    flags: &CredentialFlags,
    env: &dyn Environment,
    dotfile: &DotEnv,
    sink: &dyn ResolutionSink,
) -> CredentialSet {
    let mut credentials = CredentialSet::default();

    for field in CredentialField::ALL {
        let (value, source) = resolve_field(field, flags, env, dotfile);
        sink.record(field, source);

        *credentials.slot(field) = if field.is_customer_id() {
            normalize_customer_id(&value)
        } else {
            value
        };
    }

    credentials
}

/// Resolves against the process environment and the dotfile at `dotfile_path`,
/// tracing the source of each field.
pub fn resolve_from_process(flags: &CredentialFlags, dotfile_path: &Path) -> CredentialSet {
    resolve(
        flags,
        &ProcessEnvironment,
        &DotEnv::load(dotfile_path),
        &TracingSink,
    )
}

fn resolve_field(
    field: CredentialField,
    flags: &CredentialFlags,
    env: &dyn Environment,
    dotfile: &DotEnv,
) -> (String, CredentialSource) {
    if let Some(value) = flags.get(field).filter(|v| !v.is_empty()) {
        return (value.to_string(), CredentialSource::Flag);
    }
    if let Some(value) = env.var(field.env_var()).filter(|v| !v.is_empty()) {
        return (value, CredentialSource::Environment);
    }
    if let Some(value) = dotfile.get(field.env_var()).filter(|v| !v.is_empty()) {
        return (value.to_string(), CredentialSource::Dotfile);
    }
    (String::new(), CredentialSource::Unset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        records: RefCell<Vec<(CredentialField, CredentialSource)>>,
    }

    impl ResolutionSink for RecordingSink {
        fn record(&self, field: CredentialField, source: CredentialSource) {
            self.records.borrow_mut().push((field, source));
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sink_receives_one_record_per_field_in_order() {
        let sink = RecordingSink::default();
        let flags = CredentialFlags {
            developer_token: Some(String::from("flag-token")),
            ..CredentialFlags::default()
        };
        let environment = env(&[(ENV_CLIENT_ID, "env-client")]);
        let dotfile = DotEnv::from_iter([(ENV_CLIENT_SECRET, "dot-secret")]);

        resolve(&flags, &environment, &dotfile, &sink);

        let records = sink.records.into_inner();
        assert_eq!(
            records,
            vec![
                (CredentialField::DeveloperToken, CredentialSource::Flag),
                (CredentialField::ClientId, CredentialSource::Environment),
                (CredentialField::ClientSecret, CredentialSource::Dotfile),
                (CredentialField::RefreshToken, CredentialSource::Unset),
                (CredentialField::CustomerId, CredentialSource::Unset),
                (CredentialField::LoginCustomerId, CredentialSource::Unset),
            ]
        );
    }

    #[test]
    fn empty_flag_falls_through_to_environment() {
        let flags = CredentialFlags {
            client_id: Some(String::new()),
            ..CredentialFlags::default()
        };
        let environment = env(&[(ENV_CLIENT_ID, "env-client")]);

        let credentials = resolve(&flags, &environment, &DotEnv::default(), &TracingSink);
        assert_eq!(credentials.client_id, "env-client");
    }

    #[test]
    fn login_customer_id_is_normalized_and_optional() {
        let environment = env(&[
            (ENV_DEVELOPER_TOKEN, "dev"),
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_REFRESH_TOKEN, "refresh"),
            (ENV_CUSTOMER_ID, "123-456-7890"),
        ]);

        let credentials = resolve(
            &CredentialFlags::default(),
            &environment,
            &DotEnv::default(),
            &TracingSink,
        );
        assert!(credentials.is_complete());
        assert_eq!(credentials.customer_id, "1234567890");
        assert_eq!(credentials.login_customer_id(), None);

        let with_manager = resolve(
            &CredentialFlags {
                login_customer_id: Some(String::from("138-140-4200")),
                ..CredentialFlags::default()
            },
            &environment,
            &DotEnv::default(),
            &TracingSink,
        );
        assert_eq!(with_manager.login_customer_id(), Some("1381404200"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = CredentialSet {
            developer_token: String::from("dev-SECRET"),
            client_id: String::from("client.apps"),
            client_secret: String::from("client-SECRET"),
            refresh_token: String::from("refresh-SECRET"),
            customer_id: String::from("1234567890"),
            login_customer_id: String::new(),
        };

        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("SECRET"), "{rendered}");
        assert!(rendered.contains("client.apps"));
        assert!(rendered.contains("1234567890"));
    }

    #[test]
    fn missing_fields_lists_required_fields_only() {
        let credentials = CredentialSet {
            developer_token: String::from("dev"),
            customer_id: String::from("1"),
            ..CredentialSet::default()
        };

        assert_eq!(
            credentials.missing_fields(),
            vec![
                CredentialField::ClientId,
                CredentialField::ClientSecret,
                CredentialField::RefreshToken,
            ]
        );
    }
}
