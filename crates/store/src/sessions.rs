use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use frontdesk_core::business::BusinessType;
use frontdesk_core::errors::SessionError;
use frontdesk_core::session::{Role, Session, Turn};

/// Concurrent conversation store. The outer map lock covers create/get/end;
/// each session carries its own mutex so turns for one key serialize while
/// turns for different keys proceed independently.
///
/// Sessions are never removed automatically: absent an explicit `end`, they
/// live for the process lifetime.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session under the given key, or under a fresh UUID when no
    /// key is supplied. Creation is a single locked upsert, so two racing
    /// creates for one key cannot both succeed.
    pub async fn create(
        &self,
        business_type: BusinessType,
        session_key: Option<String>,
    ) -> Result<Session, SessionError> {
        let key = session_key.unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&key) {
            return Err(SessionError::Duplicate(key));
        }

        let session = Session::new(key.clone(), business_type);
        sessions.insert(key.clone(), Arc::new(Mutex::new(session.clone())));
        tracing::debug!(event_name = "session.created", session_key = %key, "session created");
        Ok(session)
    }

    /// Race-free adapter idiom: returns the existing session or creates one
    /// under the same write lock.
    pub async fn get_or_create(&self, business_type: BusinessType, session_key: &str) -> Session {
        if let Some(handle) = self.handle(session_key).await {
            return handle.lock().await.clone();
        }

        let mut sessions = self.sessions.write().await;
        if let Some(handle) = sessions.get(session_key) {
            let handle = Arc::clone(handle);
            drop(sessions);
            return handle.lock().await.clone();
        }

        let session = Session::new(session_key, business_type);
        sessions.insert(session_key.to_owned(), Arc::new(Mutex::new(session.clone())));
        tracing::debug!(event_name = "session.created", session_key, "session created");
        session
    }

    /// Snapshot of the session, or None for an unknown key. Never errors.
    pub async fn get(&self, session_key: &str) -> Option<Session> {
        let handle = self.handle(session_key).await?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    pub async fn append_message(
        &self,
        session_key: &str,
        role: Role,
        text: &str,
    ) -> Result<(), SessionError> {
        let handle = self
            .handle(session_key)
            .await
            .ok_or_else(|| SessionError::NotFound(session_key.to_owned()))?;

        let mut session = handle.lock().await;
        session.append_turn(role, text);
        Ok(())
    }

    pub async fn set_context(
        &self,
        session_key: &str,
        context_key: &str,
        value: serde_json::Value,
    ) -> Result<(), SessionError> {
        let handle = self
            .handle(session_key)
            .await
            .ok_or_else(|| SessionError::NotFound(session_key.to_owned()))?;

        let mut session = handle.lock().await;
        session.set_context(context_key, value);
        Ok(())
    }

    /// Ordered transcript, or an empty sequence for an unknown key. The one
    /// forgiving read, used by status and debug endpoints.
    pub async fn history(&self, session_key: &str) -> Vec<Turn> {
        match self.handle(session_key).await {
            Some(handle) => handle.lock().await.transcript.clone(),
            None => Vec::new(),
        }
    }

    /// Idempotent removal.
    pub async fn end(&self, session_key: &str) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(session_key).is_some() {
            tracing::debug!(event_name = "session.ended", session_key, "session removed");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn handle(&self, session_key: &str) -> Option<Arc<Mutex<Session>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_key).map(Arc::clone)
    }
}
