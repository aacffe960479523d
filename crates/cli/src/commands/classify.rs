use serde_json::json;

use frontdesk_agent::classify;

use crate::commands::CommandResult;

pub fn run(text: &str) -> CommandResult {
    let topic = classify(text);
    CommandResult::success_with_detail(
        "classify",
        format!("routed to topic `{}`", topic.as_str()),
        Some(json!({"topic": topic.as_str()})),
    )
}
