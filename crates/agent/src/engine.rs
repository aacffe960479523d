use std::sync::Arc;

use tracing::{info, warn};

use frontdesk_core::business::BusinessType;
use frontdesk_core::errors::EngineError;
use frontdesk_core::knowledge::TopicLabel;
use frontdesk_core::session::Role;
use frontdesk_store::{KnowledgeStore, SessionStore};

use crate::composer::{compose, ResponseTable};
use crate::intent::classify;
use crate::resolver::{DisabledResolver, UnknownTopicResolver};
use crate::sentiment;

/// Per-turn orchestrator shared by every channel adapter. Stateless across
/// calls: all conversation memory lives in the session store, so the engine
/// is reentrant per session.
pub struct DialogueEngine {
    sessions: Arc<SessionStore>,
    knowledge: Arc<KnowledgeStore>,
    resolver: Arc<dyn UnknownTopicResolver>,
}

impl DialogueEngine {
    pub fn new(sessions: Arc<SessionStore>, knowledge: Arc<KnowledgeStore>) -> Self {
        Self { sessions, knowledge, resolver: Arc::new(DisabledResolver) }
    }

    pub fn with_resolver(
        sessions: Arc<SessionStore>,
        knowledge: Arc<KnowledgeStore>,
        resolver: Arc<dyn UnknownTopicResolver>,
    ) -> Self {
        Self { sessions, knowledge, resolver }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeStore> {
        &self.knowledge
    }

    /// Runs one turn: resolve the session, record the user message, route
    /// the intent, record the reply. Knowledge and composition can only
    /// degrade to the fallback phrase; session failures propagate because
    /// they mean the caller broke the create-before-append protocol.
    pub async fn handle_turn(
        &self,
        session_key: &str,
        business_type: BusinessType,
        text: &str,
    ) -> Result<String, EngineError> {
        let session = self.sessions.get_or_create(business_type, session_key).await;

        self.sessions.append_message(session_key, Role::User, text).await?;

        let label = classify(text);
        let answer = self.knowledge.query(label).await;
        let responses = ResponseTable::for_business(business_type);

        let reply = match label {
            TopicLabel::Unknown => match self.resolver.resolve(text, &session.transcript).await {
                Ok(Some(resolved)) => resolved,
                Ok(None) => compose(&answer, text, &responses),
                Err(error) => {
                    warn!(
                        event_name = "dialogue.resolver_failed",
                        session_key,
                        error = %error,
                        "unknown-topic resolver failed, using canned table"
                    );
                    compose(&answer, text, &responses)
                }
            },
            _ => compose(&answer, text, &responses),
        };

        let score = sentiment::score(text);
        let score_value = serde_json::to_value(&score).unwrap_or(serde_json::Value::Null);
        self.sessions.set_context(session_key, "sentiment", score_value).await?;

        self.sessions.append_message(session_key, Role::Assistant, &reply).await?;

        info!(
            event_name = "dialogue.turn_completed",
            session_key,
            topic = label.as_str(),
            sentiment = score.sentiment.as_str(),
            "turn completed"
        );

        Ok(reply)
    }
}
