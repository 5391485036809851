use kwplan_core::CredentialField;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(
        "incomplete credentials, missing: {}\nhint: set {} via flags, the environment or the env file",
        field_names(.missing),
        env_names(.missing)
    )]
    IncompleteCredentials { missing: Vec<CredentialField> },

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::IncompleteCredentials { .. } => 2,
            Self::Serialization(_) => 4,
            Self::Logging(_) => 5,
            Self::Io(_) => 10,
        }
    }
}

fn field_names(fields: &[CredentialField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn env_names(fields: &[CredentialField]) -> String {
    fields
        .iter()
        .map(|field| field.env_var())
        .collect::<Vec<_>>()
        .join(", ")
}
