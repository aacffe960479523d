//! Dialogue core - intent routing and reply generation
//!
//! This crate is the conversational "brain" shared by every channel adapter:
//! - **Intent classification** (`intent`) - ordered keyword rules over a
//!   closed topic set
//! - **Sentiment tagging** (`sentiment`) - lexicon counts with a neutral
//!   tie-break
//! - **Reply composition** (`composer`) - per-topic templates plus a canned
//!   phrase table; total for any input
//! - **Turn orchestration** (`engine`) - get-or-create session, record both
//!   turns, tag sentiment into the session context
//!
//! The engine holds no per-conversation state of its own; the accumulated
//! transcript in the session store is the only memory. Classification looks
//! only at the current input, not the transcript.

pub mod composer;
pub mod engine;
pub mod intent;
pub mod resolver;
pub mod sentiment;

pub use composer::{compose, ResponseTable};
pub use engine::DialogueEngine;
pub use intent::classify;
pub use resolver::{DisabledResolver, ResolverError, UnknownTopicResolver};
pub use sentiment::{score, Sentiment, SentimentScore};
