//! Channel adapters - transport payloads in, engine turns out
//!
//! Each adapter translates one transport's inbound payload into a dialogue
//! turn and wraps the reply back into that transport's envelope: TwiML for
//! SMS and voice webhooks, JSON for the raw audio socket. Speech-to-text
//! and text-to-speech are collaborator traits with inert defaults; real
//! backends plug in without touching the adapters.

pub mod audio;
pub mod sms;
pub mod speech;
pub mod twiml;
pub mod voice;

use thiserror::Error;

use frontdesk_core::errors::EngineError;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("inbound payload is missing the sender number")]
    MissingSender,
}

pub use audio::{AudioSocketAdapter, AudioTurnReply};
pub use sms::{SmsAdapter, SmsWebhook};
pub use speech::{
    SilentSynthesizer, SpeechSynthesizer, SynthesisError, TranscribeError, Transcriber,
    UnavailableTranscriber,
};
pub use voice::VoiceAdapter;
