use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::business::BusinessType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message within a conversation. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A bounded conversation: stable key, append-only transcript, and a
/// last-write-wins context bag. Sessions live until explicitly ended or the
/// process exits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub key: String,
    pub business_type: BusinessType,
    pub transcript: Vec<Turn>,
    pub context: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(key: impl Into<String>, business_type: BusinessType) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            business_type,
            transcript: Vec::new(),
            context: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn append_turn(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.push(Turn { role, text: text.into(), timestamp: Utc::now() });
        self.updated_at = Utc::now();
    }

    pub fn set_context(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.context.insert(key.into(), value);
        self.updated_at = Utc::now();
    }
}
