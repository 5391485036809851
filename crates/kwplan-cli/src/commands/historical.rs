use kwplan_core::{HistoricalMetricsInput, KeywordTools};
use tokio_util::sync::CancellationToken;

use crate::cli::HistoricalArgs;
use crate::error::CliError;

use super::{clean_keywords, CommandOutput};

pub async fn run(
    args: &HistoricalArgs,
    tools: &KeywordTools,
    cancel: &CancellationToken,
) -> Result<CommandOutput, CliError> {
    let input = HistoricalMetricsInput {
        keywords: clean_keywords(&args.keywords),
    };

    let text = tools.get_historical_metrics(input, cancel).await?;
    Ok(CommandOutput::from_tool_text(text))
}
