use super::legal_corpus;
use crate::{errors::StoreError, providers::db::storage::KnowledgeStore};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// What [`ensure_knowledge_base`] found on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KnowledgeBaseStatus {
    /// The store was empty and has been populated with the built-in corpus.
    Initialized { inserted: usize },
    /// The store already held provisions and was reused as-is.
    Existing { count: u64 },
}

/// Populates the store with the built-in corpus if, and only if, it is empty.
///
/// Two processes starting against the same empty store at once may both
/// insert; that race is not guarded against.
pub async fn ensure_knowledge_base(
    store: &dyn KnowledgeStore,
) -> Result<KnowledgeBaseStatus, StoreError> {
    let count = store.count().await?;
    if count > 0 {
        info!(count, "Using existing legal knowledge base.");
        return Ok(KnowledgeBaseStatus::Existing { count });
    }

    let corpus = legal_corpus();
    let ids: Vec<String> = corpus.iter().map(|_| Uuid::new_v4().to_string()).collect();
    let inserted = store.add(&corpus, &ids).await?;
    info!(inserted, "Legal knowledge base initialized.");
    Ok(KnowledgeBaseStatus::Initialized { inserted })
}
