use crate::{
    errors::StoreError,
    knowledge::{Category, Provision},
    types::{RetrievedProvision, StoredProvision},
};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for the vector-backed store holding the legal knowledge base.
///
/// There is no update or delete: provisions are inserted once
/// and reused for the lifetime of the store.
#[async_trait]
pub trait KnowledgeStore: Send + Sync + DynClone + Debug {
    /// Inserts provisions under the given ids. `ids` must be as long as `provisions`.
    async fn add(&self, provisions: &[Provision], ids: &[String]) -> Result<usize, StoreError>;

    /// Returns the `n_results` provisions nearest to `text`, most similar first.
    async fn query(&self, text: &str, n_results: u32)
        -> Result<Vec<RetrievedProvision>, StoreError>;

    /// Returns the number of stored provisions.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Lists stored provisions ordered by title, optionally for a single category.
    async fn list(&self, category: Option<Category>) -> Result<Vec<StoredProvision>, StoreError>;
}

dyn_clone::clone_trait_object!(KnowledgeStore);
