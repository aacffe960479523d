use serde_json::json;

use frontdesk_agent::sentiment;

use crate::commands::CommandResult;

pub fn run(text: &str) -> CommandResult {
    let score = sentiment::score(text);
    CommandResult::success_with_detail(
        "sentiment",
        format!("scored as {}", score.sentiment.as_str()),
        Some(json!({
            "sentiment": score.sentiment.as_str(),
            "positive_score": score.positive_score,
            "negative_score": score.negative_score,
        })),
    )
}
