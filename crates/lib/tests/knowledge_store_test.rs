//! # Knowledge Store Tests
//!
//! Exercises the SQLite-backed knowledge store with the local hashing embedder:
//! first-launch seeding, reuse on later launches, nearest-neighbour ordering and
//! category listing. Each test gets its own temp directory.

mod common;

use crate::common::setup_tracing;
use legalrag::embedding::HashEmbedder;
use legalrag::knowledge::{ensure_knowledge_base, legal_corpus, Category, KnowledgeBaseStatus};
use legalrag::providers::db::sqlite::SqliteKnowledgeStore;
use legalrag::providers::db::storage::KnowledgeStore;
use legalrag::retriever::retrieve_provisions;
use legalrag::StoreError;
use legalrag_test_utils::{open_store, TestSetup};

/// An empty store is seeded with the whole corpus; a second call reuses it.
#[tokio::test]
async fn test_ensure_knowledge_base_seeds_once() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    assert_eq!(setup.store.count().await.unwrap(), 0);

    let first = ensure_knowledge_base(&setup.store).await.unwrap();
    assert_eq!(first, KnowledgeBaseStatus::Initialized { inserted: 36 });

    let second = ensure_knowledge_base(&setup.store).await.unwrap();
    assert_eq!(second, KnowledgeBaseStatus::Existing { count: 36 });
    assert_eq!(setup.store.count().await.unwrap(), 36);
}

/// Reopening the same database file finds the provisions and inserts nothing.
#[tokio::test]
async fn test_reopening_store_does_not_duplicate() {
    setup_tracing();
    let TestSetup {
        store, db_path, dir, ..
    } = TestSetup::seeded().await.unwrap();
    drop(store);

    let reopened = open_store(&db_path).await.unwrap();
    let status = ensure_knowledge_base(&reopened).await.unwrap();
    assert_eq!(status, KnowledgeBaseStatus::Existing { count: 36 });
    assert_eq!(reopened.list(None).await.unwrap().len(), 36);
    drop(dir);
}

/// Rows written under one embedding model are invisible to another.
#[tokio::test]
async fn test_store_is_scoped_by_embedding_model() {
    setup_tracing();
    let TestSetup {
        store, db_path, dir, ..
    } = TestSetup::seeded().await.unwrap();
    drop(store);

    let path = db_path.to_str().unwrap();
    let other = SqliteKnowledgeStore::new(path, Box::new(HashEmbedder::new(64)))
        .await
        .unwrap();
    assert_eq!(other.count().await.unwrap(), 0);
    assert!(other.query("contract", 8).await.unwrap().is_empty());
    drop(dir);
}

/// A query identical to a provision's content returns that provision first.
#[tokio::test]
async fn test_exact_content_is_nearest() {
    setup_tracing();
    let setup = TestSetup::seeded().await.unwrap();

    for provision in legal_corpus().iter().filter(|p| p.category == Category::PropertyLaw) {
        let hits = setup.store.query(&provision.content, 8).await.unwrap();
        assert_eq!(hits[0].provision, provision.provision);
        assert!(hits[0].distance.abs() < 1e-4, "distance was {}", hits[0].distance);
    }
}

/// Results come back most similar first.
#[tokio::test]
async fn test_query_results_are_ordered_by_distance() {
    setup_tracing();
    let setup = TestSetup::seeded().await.unwrap();

    let hits = setup
        .store
        .query("my employer dismissed me without paying provident fund", 8)
        .await
        .unwrap();
    assert_eq!(hits.len(), 8);
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
}

/// Retrieval yields exactly K blocks formatted as "title: content".
#[tokio::test]
async fn test_retrieve_provisions_returns_k_blocks() {
    setup_tracing();
    let setup = TestSetup::seeded().await.unwrap();

    let context = retrieve_provisions(&setup.store, common::LANDLORD_CASE, 8)
        .await
        .unwrap();
    assert_eq!(context.provisions.len(), 8);
    assert_eq!(context.text.split("\n\n").count(), 8);
    let first_block = context.text.split("\n\n").next().unwrap();
    assert_eq!(first_block, context.provisions[0].as_block());
}

/// An empty store cannot serve retrieval.
#[tokio::test]
async fn test_retrieve_from_empty_store_fails() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();

    let result = retrieve_provisions(&setup.store, "anything", 8).await;
    assert!(matches!(result, Err(StoreError::EmptyKnowledgeBase)));
}

/// Text without a single word embeds to a zero vector, which has no distance
/// to anything; the store refuses it instead of returning arbitrary rows.
#[tokio::test]
async fn test_query_without_words_is_rejected() {
    setup_tracing();
    let setup = TestSetup::seeded().await.unwrap();

    for input in ["???", "!!", "-- ... --"] {
        let result = setup.store.query(input, 8).await;
        assert!(
            matches!(result, Err(StoreError::UnsearchableQuery)),
            "{input:?} was not rejected"
        );
    }
}

/// Listing by category returns only that category, ordered by title.
#[tokio::test]
async fn test_list_by_category() {
    setup_tracing();
    let setup = TestSetup::seeded().await.unwrap();

    let family = setup.store.list(Some(Category::FamilyLaw)).await.unwrap();
    let titles: Vec<&str> = family.iter().map(|p| p.provision.provision.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Hindu Marriage Act, 1955",
            "Hindu Succession Act, 1956 (as amended)",
            "Muslim Personal Law (Shariat) Application Act, 1937",
            "Special Marriage Act, 1954",
        ]
    );
    assert!(family.iter().all(|p| !p.id.is_empty()));
}

/// Mismatched ids and provisions are rejected before anything is written.
#[tokio::test]
async fn test_add_rejects_length_mismatch() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();

    let corpus = legal_corpus();
    let result = setup.store.add(&corpus[..2], &["only-one".to_string()]).await;
    assert!(matches!(
        result,
        Err(StoreError::LengthMismatch {
            ids: 1,
            provisions: 2
        })
    ));
    assert_eq!(setup.store.count().await.unwrap(), 0);
}
