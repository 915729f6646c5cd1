//! # Provision Retrieval
//!
//! Turns a free-text case description into the block of provisions that is
//! pasted into the prompt.

use crate::{
    errors::StoreError,
    providers::db::storage::KnowledgeStore,
    types::{RetrievedContext, RetrievedProvision},
};
use tracing::info;

/// Joins provisions as `"title: content"` blocks separated by blank lines,
/// keeping the given order.
pub fn format_provisions(provisions: &[RetrievedProvision]) -> String {
    provisions
        .iter()
        .map(RetrievedProvision::as_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Retrieves the `top_k` provisions nearest to `case_description`.
///
/// There is no relevance threshold and no de-duplication: the store's order is
/// kept as-is, and a store holding at least `top_k` provisions always yields
/// exactly `top_k` blocks.
pub async fn retrieve_provisions(
    store: &dyn KnowledgeStore,
    case_description: &str,
    top_k: u32,
) -> Result<RetrievedContext, StoreError> {
    let provisions = store.query(case_description, top_k).await?;
    if provisions.is_empty() {
        return Err(StoreError::EmptyKnowledgeBase);
    }
    info!(
        retrieved = provisions.len(),
        top_k,
        "Retrieved provisions for case."
    );
    let text = format_provisions(&provisions);
    Ok(RetrievedContext { provisions, text })
}
