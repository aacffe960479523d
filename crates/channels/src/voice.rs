use std::sync::Arc;

use tracing::error;

use frontdesk_agent::DialogueEngine;
use frontdesk_core::business::BusinessType;

use crate::twiml;
use crate::ChannelError;

const GREETING: &str = "Hello! Welcome to our AI customer service. How can I help you today?";
const HANDLE_INPUT_PATH: &str = "/api/v1/voice/handle-input";

/// Voice-call channel. Each call gets a generated session key; the TwiML
/// gather action threads that key through every subsequent utterance.
pub struct VoiceAdapter {
    engine: Arc<DialogueEngine>,
    business_type: BusinessType,
}

impl VoiceAdapter {
    pub fn new(engine: Arc<DialogueEngine>, business_type: BusinessType) -> Self {
        Self { engine, business_type }
    }

    /// Answers an incoming call: creates a fresh session and renders the
    /// greeting plus the first speech gather.
    pub async fn answer_call(&self) -> Result<String, ChannelError> {
        let session = self
            .engine
            .sessions()
            .create(self.business_type, None)
            .await
            .map_err(frontdesk_core::errors::EngineError::from)?;
        let action = gather_action(&session.key);
        Ok(twiml::voice_response(GREETING, Some(&action)))
    }

    /// Runs one spoken turn and renders the reply plus the next gather.
    /// Engine failures degrade to the user-safe phrase so the caller always
    /// hears something.
    pub async fn handle_speech(&self, session_key: &str, speech: &str) -> String {
        let reply = match self.engine.handle_turn(session_key, self.business_type, speech).await {
            Ok(reply) => reply,
            Err(engine_error) => {
                error!(
                    event_name = "channel.voice.turn_failed",
                    session_key,
                    error = %engine_error,
                    "voice turn failed, speaking fallback"
                );
                engine_error.user_message().to_owned()
            }
        };

        let action = gather_action(session_key);
        twiml::voice_response(&reply, Some(&action))
    }
}

fn gather_action(session_key: &str) -> String {
    format!("{HANDLE_INPUT_PATH}?session_id={session_key}")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use frontdesk_agent::DialogueEngine;
    use frontdesk_core::business::BusinessType;
    use frontdesk_store::{InMemoryKnowledgeRepository, KnowledgeStore, SessionStore};

    use super::VoiceAdapter;

    async fn adapter() -> VoiceAdapter {
        let sessions = Arc::new(SessionStore::new());
        let knowledge = Arc::new(
            KnowledgeStore::open(
                BusinessType::Restaurant,
                Arc::new(InMemoryKnowledgeRepository::new()),
            )
            .await,
        );
        VoiceAdapter::new(
            Arc::new(DialogueEngine::new(sessions, knowledge)),
            BusinessType::Restaurant,
        )
    }

    fn session_key_from(twiml: &str) -> String {
        let marker = "session_id=";
        let start = twiml.find(marker).expect("gather action") + marker.len();
        let rest = &twiml[start..];
        let end = rest.find('"').expect("attribute close");
        rest[..end].to_owned()
    }

    #[tokio::test]
    async fn answering_a_call_creates_a_session_and_greets() {
        let adapter = adapter().await;
        let twiml = adapter.answer_call().await.expect("answer");

        assert!(twiml.contains("<Say>Hello! Welcome to our AI customer service."));
        let key = session_key_from(&twiml);
        assert!(adapter.engine.sessions().get(&key).await.is_some());
    }

    #[tokio::test]
    async fn speech_turns_thread_the_same_session() {
        let adapter = adapter().await;
        let twiml = adapter.answer_call().await.expect("answer");
        let key = session_key_from(&twiml);

        let first = adapter.handle_speech(&key, "What are your hours?").await;
        assert!(first.contains("<Say>We are open Monday-Sunday: 11am-10pm.</Say>"));
        assert!(first.contains(&format!("session_id={key}")));

        adapter.handle_speech(&key, "Tell me about desserts").await;
        assert_eq!(adapter.engine.sessions().history(&key).await.len(), 4);
    }

    #[tokio::test]
    async fn speech_on_a_fresh_key_still_answers() {
        // The engine resolves sessions with get-or-create, so a caller that
        // skipped the entry webhook still gets a reply.
        let adapter = adapter().await;
        let twiml = adapter.handle_speech("out-of-band", "what's on the menu").await;
        assert!(twiml.contains("Our menu includes"));
    }

    #[tokio::test]
    async fn each_call_gets_its_own_session() {
        let adapter = adapter().await;
        let first = session_key_from(&adapter.answer_call().await.expect("answer"));
        let second = session_key_from(&adapter.answer_call().await.expect("answer"));
        assert_ne!(first, second);
    }
}
