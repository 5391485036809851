use kwplan_core::{KeywordIdeasInput, KeywordTools};
use tokio_util::sync::CancellationToken;

use crate::cli::IdeasArgs;
use crate::error::CliError;

use super::{clean_keywords, CommandOutput};

pub async fn run(
    args: &IdeasArgs,
    tools: &KeywordTools,
    cancel: &CancellationToken,
) -> Result<CommandOutput, CliError> {
    let input = KeywordIdeasInput {
        seed_keywords: clean_keywords(&args.keywords),
        url: args.url.clone(),
        language: args.language.clone(),
    };

    let text = tools.generate_keyword_ideas(input, cancel).await?;
    Ok(CommandOutput::from_tool_text(text))
}
