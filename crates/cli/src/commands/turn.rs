use std::sync::Arc;

use serde_json::json;

use frontdesk_agent::{classify, DialogueEngine};
use frontdesk_core::business::BusinessType;
use frontdesk_core::config::{AppConfig, LoadOptions};
use frontdesk_store::{InMemoryKnowledgeRepository, KnowledgeStore, SessionStore};

use crate::commands::CommandResult;

/// Runs one turn against a throwaway in-process engine seeded with the
/// default knowledge document. Useful for checking phrasing and routing
/// without a server.
pub fn run(text: &str, session: &str, business_type: Option<&str>) -> CommandResult {
    let business_type = match resolve_business_type(business_type) {
        Ok(business_type) => business_type,
        Err(message) => return CommandResult::failure("turn", "config_validation", message, 2),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "turn",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let outcome = runtime.block_on(async {
        let sessions = Arc::new(SessionStore::new());
        let knowledge = Arc::new(
            KnowledgeStore::open(business_type, Arc::new(InMemoryKnowledgeRepository::new()))
                .await,
        );
        let engine = DialogueEngine::new(Arc::clone(&sessions), knowledge);

        let reply = engine.handle_turn(session, business_type, text).await?;
        let snapshot = sessions.get(session).await;
        Ok::<_, frontdesk_core::errors::EngineError>((reply, snapshot))
    });

    match outcome {
        Ok((reply, snapshot)) => {
            let sentiment = snapshot
                .and_then(|session| session.context.get("sentiment").cloned())
                .unwrap_or(serde_json::Value::Null);
            CommandResult::success_with_detail(
                "turn",
                reply.clone(),
                Some(json!({
                    "session": session,
                    "business_type": business_type,
                    "topic": classify(text).as_str(),
                    "sentiment": sentiment,
                })),
            )
        }
        Err(error) => {
            CommandResult::failure("turn", "engine", format!("turn failed: {error}"), 4)
        }
    }
}

fn resolve_business_type(explicit: Option<&str>) -> Result<BusinessType, String> {
    if let Some(value) = explicit {
        return value.parse().map_err(|error| format!("{error}"));
    }

    AppConfig::load(LoadOptions::default())
        .map(|config| config.business.business_type)
        .map_err(|error| format!("configuration issue: {error}"))
}
