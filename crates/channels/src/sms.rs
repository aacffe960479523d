use std::sync::Arc;

use serde::Deserialize;
use tracing::error;

use frontdesk_agent::DialogueEngine;
use frontdesk_core::business::BusinessType;

use crate::twiml;
use crate::ChannelError;

/// Twilio-style inbound SMS webhook form fields.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SmsWebhook {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

/// Text-message channel: the sender's number is the session key, so a
/// caller's whole SMS thread lands in one conversation.
pub struct SmsAdapter {
    engine: Arc<DialogueEngine>,
    business_type: BusinessType,
}

impl SmsAdapter {
    pub fn new(engine: Arc<DialogueEngine>, business_type: BusinessType) -> Self {
        Self { engine, business_type }
    }

    /// Runs the turn and wraps the reply in a messaging TwiML document.
    /// Engine failures degrade to the user-safe phrase; only a payload
    /// without a sender is rejected.
    pub async fn handle(&self, webhook: &SmsWebhook) -> Result<String, ChannelError> {
        if webhook.from.trim().is_empty() {
            return Err(ChannelError::MissingSender);
        }

        let reply = match self
            .engine
            .handle_turn(&webhook.from, self.business_type, &webhook.body)
            .await
        {
            Ok(reply) => reply,
            Err(engine_error) => {
                error!(
                    event_name = "channel.sms.turn_failed",
                    session_key = %webhook.from,
                    error = %engine_error,
                    "sms turn failed, replying with fallback"
                );
                engine_error.user_message().to_owned()
            }
        };

        Ok(twiml::message_response(&reply))
    }
}
