use std::cell::RefCell;

use kwplan_core::{
    resolve, CredentialField, CredentialSource, DotEnv, Environment, ProcessEnvironment,
    ResolutionSink, TracingSink,
};
use serde::Serialize;

use crate::cli::Cli;
use crate::error::CliError;

use super::CommandOutput;

/// Collects sources while still tracing them.
#[derive(Default)]
struct SourceReport {
    entries: RefCell<Vec<(CredentialField, CredentialSource)>>,
}

impl ResolutionSink for SourceReport {
    fn record(&self, field: CredentialField, source: CredentialSource) {
        TracingSink.record(field, source);
        self.entries.borrow_mut().push((field, source));
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldStatus {
    field: &'static str,
    env: &'static str,
    source: &'static str,
    required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialReport {
    complete: bool,
    missing: Vec<&'static str>,
    fields: Vec<FieldStatus>,
}

/// Never fails on incomplete credentials; reporting them is the point.
pub fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    CommandOutput::success(&report(cli, &ProcessEnvironment), cli.pretty)
}

fn report(cli: &Cli, env: &dyn Environment) -> CredentialReport {
    let report = SourceReport::default();
    let credentials = resolve(
        &cli.credentials.to_flags(),
        env,
        &DotEnv::load(&cli.env_file),
        &report,
    );

    let fields = report
        .entries
        .into_inner()
        .into_iter()
        .map(|(field, source)| FieldStatus {
            field: field.as_str(),
            env: field.env_var(),
            source: source.as_str(),
            required: field.is_required(),
        })
        .collect();

    CredentialReport {
        complete: credentials.is_complete(),
        missing: credentials
            .missing_fields()
            .into_iter()
            .map(CredentialField::as_str)
            .collect(),
        fields,
    }
}
