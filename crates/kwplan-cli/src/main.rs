mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let output = commands::run(&cli).await?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.text)?;

    if output.failed {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}
