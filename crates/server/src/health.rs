use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use frontdesk_store::{KnowledgeStore, SessionStore};

#[derive(Clone)]
pub struct HealthState {
    knowledge: Arc<KnowledgeStore>,
    sessions: Arc<SessionStore>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub business_type: String,
    pub service: HealthCheck,
    pub persistence: HealthCheck,
    pub session_count: usize,
    pub checked_at: String,
}

pub fn router(knowledge: Arc<KnowledgeStore>, sessions: Arc<SessionStore>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { knowledge, sessions })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let persistence = persistence_check(&state.knowledge).await;
    let ready = persistence.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        business_type: state.knowledge.business_type().to_string(),
        service: HealthCheck {
            status: "ready",
            detail: "dialogue engine initialized".to_string(),
        },
        persistence,
        session_count: state.sessions.len().await,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn persistence_check(knowledge: &KnowledgeStore) -> HealthCheck {
    match knowledge.probe_persistence().await {
        Ok(()) => HealthCheck {
            status: "ready",
            detail: "knowledge repository reachable".to_string(),
        },
        Err(error) => HealthCheck {
            status: "degraded",
            detail: format!("knowledge repository probe failed: {error}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{extract::State, http::StatusCode, Json};

    use frontdesk_core::business::BusinessType;
    use frontdesk_core::errors::KnowledgeError;
    use frontdesk_core::knowledge::KnowledgeDocument;
    use frontdesk_store::{
        InMemoryKnowledgeRepository, KnowledgeRepository, KnowledgeStore, SessionStore,
    };

    use crate::health::{health, HealthState};

    struct UnreachableRepository;

    #[async_trait]
    impl KnowledgeRepository for UnreachableRepository {
        async fn load(&self) -> Result<Option<KnowledgeDocument>, KnowledgeError> {
            Err(KnowledgeError::Persistence("volume unmounted".to_owned()))
        }

        async fn save(&self, _document: &KnowledgeDocument) -> Result<(), KnowledgeError> {
            Err(KnowledgeError::Persistence("volume unmounted".to_owned()))
        }
    }

    #[tokio::test]
    async fn health_is_ready_when_repository_is_reachable() {
        let knowledge = Arc::new(
            KnowledgeStore::open(
                BusinessType::Restaurant,
                Arc::new(InMemoryKnowledgeRepository::new()),
            )
            .await,
        );
        let sessions = Arc::new(SessionStore::new());

        let (status, Json(payload)) = health(State(HealthState { knowledge, sessions })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.persistence.status, "ready");
        assert_eq!(payload.business_type, "restaurant");
        assert_eq!(payload.session_count, 0);
    }

    #[tokio::test]
    async fn health_degrades_when_repository_is_unreachable() {
        let knowledge = Arc::new(
            KnowledgeStore::open(BusinessType::Restaurant, Arc::new(UnreachableRepository)).await,
        );
        let sessions = Arc::new(SessionStore::new());

        let (status, Json(payload)) = health(State(HealthState { knowledge, sessions })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.service.status, "ready");
        assert_eq!(payload.persistence.status, "degraded");
    }
}
