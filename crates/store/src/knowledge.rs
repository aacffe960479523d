use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use frontdesk_core::business::BusinessType;
use frontdesk_core::errors::KnowledgeError;
use frontdesk_core::knowledge::{AnswerPayload, KnowledgeDocument, TopicAnswer, TopicLabel};

/// Durable home for the knowledge document. `load` returns None when no
/// document has been stored yet; callers fall back to the canned defaults.
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    async fn load(&self) -> Result<Option<KnowledgeDocument>, KnowledgeError>;
    async fn save(&self, document: &KnowledgeDocument) -> Result<(), KnowledgeError>;
}

/// JSON file on disk, written whole on every update.
pub struct FileKnowledgeRepository {
    path: PathBuf,
}

impl FileKnowledgeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KnowledgeRepository for FileKnowledgeRepository {
    async fn load(&self) -> Result<Option<KnowledgeDocument>, KnowledgeError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(KnowledgeError::Persistence(format!(
                    "could not read {}: {error}",
                    self.path.display()
                )))
            }
        };

        let document = serde_json::from_str::<KnowledgeDocument>(&raw).map_err(|error| {
            KnowledgeError::Persistence(format!(
                "could not parse {}: {error}",
                self.path.display()
            ))
        })?;
        Ok(Some(document))
    }

    async fn save(&self, document: &KnowledgeDocument) -> Result<(), KnowledgeError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|error| {
                    KnowledgeError::Persistence(format!(
                        "could not create {}: {error}",
                        parent.display()
                    ))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(document)
            .map_err(|error| KnowledgeError::Persistence(error.to_string()))?;
        tokio::fs::write(&self.path, raw).await.map_err(|error| {
            KnowledgeError::Persistence(format!(
                "could not write {}: {error}",
                self.path.display()
            ))
        })
    }
}

/// Volatile repository for tests and the offline CLI.
#[derive(Default)]
pub struct InMemoryKnowledgeRepository {
    document: RwLock<Option<KnowledgeDocument>>,
}

impl InMemoryKnowledgeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeRepository for InMemoryKnowledgeRepository {
    async fn load(&self) -> Result<Option<KnowledgeDocument>, KnowledgeError> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &KnowledgeDocument) -> Result<(), KnowledgeError> {
        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}

/// The business-fact store shared by every channel. Point queries are total;
/// partial updates merge in memory first and then write back, holding the
/// write lock across merge-then-persist so concurrent updates cannot lose
/// each other's keys.
pub struct KnowledgeStore {
    business_type: BusinessType,
    document: RwLock<KnowledgeDocument>,
    repository: Arc<dyn KnowledgeRepository>,
}

impl KnowledgeStore {
    /// Load-on-init: a stored document wins; otherwise (including a
    /// corrupt or unreadable store) the canned per-business defaults apply.
    pub async fn open(business_type: BusinessType, repository: Arc<dyn KnowledgeRepository>) -> Self {
        let document = match repository.load().await {
            Ok(Some(document)) => {
                debug!(
                    event_name = "knowledge.loaded",
                    business_type = %business_type,
                    "knowledge document loaded from repository"
                );
                document
            }
            Ok(None) => KnowledgeDocument::default_for(business_type),
            Err(error) => {
                warn!(
                    event_name = "knowledge.load_failed",
                    business_type = %business_type,
                    error = %error,
                    "falling back to default knowledge document"
                );
                KnowledgeDocument::default_for(business_type)
            }
        };

        Self { business_type, document: RwLock::new(document), repository }
    }

    pub fn business_type(&self) -> BusinessType {
        self.business_type
    }

    /// Total point query: absent keys (and the `Unknown` topic) resolve to
    /// `NotAvailable` rather than an error.
    pub async fn query(&self, label: TopicLabel) -> TopicAnswer {
        let Some(key) = label.document_key() else {
            return TopicAnswer::not_available(label);
        };

        let document = self.document.read().await;
        let payload = match document.get(key) {
            Some(serde_json::Value::String(text)) => AnswerPayload::Text(text.clone()),
            Some(serde_json::Value::Array(items)) => AnswerPayload::Items(items.clone()),
            Some(serde_json::Value::Object(map)) => AnswerPayload::Document(map.clone()),
            Some(other) => AnswerPayload::Text(other.to_string()),
            None => AnswerPayload::NotAvailable,
        };

        TopicAnswer { label, payload }
    }

    /// Merge the partial document and write the result back. The in-memory
    /// state keeps the merge even when the write-back fails, so the read
    /// path stays current for the rest of the process lifetime.
    pub async fn update(&self, partial: KnowledgeDocument) -> Result<(), KnowledgeError> {
        let mut document = self.document.write().await;
        document.merge(partial);
        let snapshot = document.clone();

        match self.repository.save(&snapshot).await {
            Ok(()) => {
                debug!(event_name = "knowledge.updated", "knowledge document persisted");
                Ok(())
            }
            Err(error) => {
                warn!(
                    event_name = "knowledge.persist_failed",
                    error = %error,
                    "knowledge update applied in memory only"
                );
                Err(error)
            }
        }
    }

    pub async fn snapshot(&self) -> KnowledgeDocument {
        self.document.read().await.clone()
    }

    /// Health probe for the persistence collaborator.
    pub async fn probe_persistence(&self) -> Result<(), KnowledgeError> {
        self.repository.load().await.map(|_| ())
    }
}
