//! # Semantic Retrieval Tests
//!
//! Seeds a store with the all-MiniLM-L6-v2 embedder and checks that everyday
//! descriptions reach the areas of law they are about, even when they share
//! few words with the provision text. The model is downloaded on the first run.

mod common;

use crate::common::{setup_tracing, LANDLORD_CASE};
use legalrag::embedding::{FastEmbedder, FASTEMBED_MODEL_NAME};
use legalrag::knowledge::{ensure_knowledge_base, Category, KnowledgeBaseStatus};
use legalrag::providers::db::sqlite::SqliteKnowledgeStore;
use legalrag::retriever::retrieve_provisions;

#[tokio::test]
async fn test_descriptions_retrieve_their_area_of_law() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = std::env::temp_dir().join("legalrag-fastembed-cache");
    let embedder = FastEmbedder::new(Some(cache_dir)).await.unwrap();
    let db_path = dir.path().join("legal.db");
    let store = SqliteKnowledgeStore::new(db_path.to_str().unwrap(), Box::new(embedder))
        .await
        .unwrap();
    assert_eq!(
        ensure_knowledge_base(&store).await.unwrap(),
        KnowledgeBaseStatus::Initialized { inserted: 36 }
    );

    let cases: [(&str, &[Category]); 3] = [
        (
            "My landlord is refusing to return my security deposit.",
            &[Category::PropertyLaw, Category::ContractLaw],
        ),
        (LANDLORD_CASE, &[Category::PropertyLaw, Category::ContractLaw]),
        (
            "My husband beats me and I want to end our relationship",
            &[Category::FamilyLaw],
        ),
    ];
    for (description, expected) in cases {
        let context = retrieve_provisions(&store, description, 8).await.unwrap();
        let found: Vec<_> = context
            .provisions
            .iter()
            .map(|p| (p.provision.as_str(), p.category))
            .collect();
        assert!(
            found.iter().any(|(_, category)| expected.contains(category)),
            "{FASTEMBED_MODEL_NAME} retrieved {found:?} for {description:?}"
        );
    }
}
