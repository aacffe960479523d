use async_trait::async_trait;
use thiserror::Error;

use frontdesk_core::session::Turn;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown-topic resolver failed: {0}")]
pub struct ResolverError(pub String);

/// Optional escape hatch for inputs no keyword rule claims, e.g. a hosted
/// language model. The engine consults it before the canned-phrase table and
/// treats `None` or an error as "use the canned table"; a deployment never
/// requires a working resolver.
#[async_trait]
pub trait UnknownTopicResolver: Send + Sync {
    async fn resolve(&self, text: &str, history: &[Turn]) -> Result<Option<String>, ResolverError>;
}

/// Default resolver: always defers to the canned table.
#[derive(Default)]
pub struct DisabledResolver;

#[async_trait]
impl UnknownTopicResolver for DisabledResolver {
    async fn resolve(
        &self,
        _text: &str,
        _history: &[Turn],
    ) -> Result<Option<String>, ResolverError> {
        Ok(None)
    }
}
