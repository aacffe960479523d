pub mod knowledge;
pub mod sessions;

pub use knowledge::{
    FileKnowledgeRepository, InMemoryKnowledgeRepository, KnowledgeRepository, KnowledgeStore,
};
pub use sessions::SessionStore;
