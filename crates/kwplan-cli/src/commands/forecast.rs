use kwplan_core::{KeywordForecastInput, KeywordTools};
use tokio_util::sync::CancellationToken;

use crate::cli::ForecastArgs;
use crate::error::CliError;

use super::{clean_keywords, CommandOutput};

pub async fn run(
    args: &ForecastArgs,
    tools: &KeywordTools,
    cancel: &CancellationToken,
) -> Result<CommandOutput, CliError> {
    let input = KeywordForecastInput {
        keywords: clean_keywords(&args.keywords),
        max_cpc_micros: args.max_cpc_micros,
        forecast_days: args.forecast_days,
    };

    let text = tools.get_keyword_forecast(input, cancel).await?;
    Ok(CommandOutput::from_tool_text(text))
}
