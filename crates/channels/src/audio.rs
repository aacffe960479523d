use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use frontdesk_agent::DialogueEngine;
use frontdesk_core::business::BusinessType;

use crate::speech::{Transcriber, TRANSCRIPTION_UNAVAILABLE};

/// JSON envelope sent back over the audio socket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AudioTurnReply {
    pub session_key: String,
    pub transcript: String,
    pub reply: String,
}

/// Raw-audio channel: one complete binary utterance in, one JSON reply out.
/// Total by construction - transcription and engine failures both degrade to
/// fixed phrases so the socket peer always receives an envelope.
pub struct AudioSocketAdapter {
    engine: Arc<DialogueEngine>,
    transcriber: Arc<dyn Transcriber>,
    business_type: BusinessType,
}

impl AudioSocketAdapter {
    pub fn new(
        engine: Arc<DialogueEngine>,
        transcriber: Arc<dyn Transcriber>,
        business_type: BusinessType,
    ) -> Self {
        Self { engine, transcriber, business_type }
    }

    pub async fn handle_utterance(&self, session_key: &str, audio: &[u8]) -> AudioTurnReply {
        let transcript = match self.transcriber.transcribe(audio).await {
            Ok(transcript) => transcript,
            Err(transcribe_error) => {
                warn!(
                    event_name = "channel.audio.transcription_failed",
                    session_key,
                    error = %transcribe_error,
                    "transcription failed, using placeholder transcript"
                );
                TRANSCRIPTION_UNAVAILABLE.to_owned()
            }
        };

        let reply = match self
            .engine
            .handle_turn(session_key, self.business_type, &transcript)
            .await
        {
            Ok(reply) => reply,
            Err(engine_error) => {
                error!(
                    event_name = "channel.audio.turn_failed",
                    session_key,
                    error = %engine_error,
                    "audio turn failed, replying with fallback"
                );
                engine_error.user_message().to_owned()
            }
        };

        AudioTurnReply { session_key: session_key.to_owned(), transcript, reply }
    }
}
