use anyhow::Result;
use async_trait::async_trait;
use legalrag::embedding::HashEmbedder;
use legalrag::errors::PromptError;
use legalrag::knowledge::{ensure_knowledge_base, KnowledgeBaseStatus};
use legalrag::providers::ai::AiProvider;
use legalrag::providers::db::sqlite::SqliteKnowledgeStore;
use legalrag::{LegalAdvisor, LegalAdvisorBuilder};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// --- Test Setup ---

/// An isolated knowledge store and history folder inside a temp directory.
pub struct TestSetup {
    pub store: SqliteKnowledgeStore,
    pub db_path: PathBuf,
    pub history_dir: PathBuf,
    /// Removed when the setup is dropped.
    pub dir: TempDir,
}

impl TestSetup {
    /// Creates an empty store backed by a file in a fresh temp directory.
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("legal_vectorstore").join("legal.db");
        let history_dir = dir.path().join("case_history");
        let store = open_store(&db_path).await?;
        Ok(Self {
            store,
            db_path,
            history_dir,
            dir,
        })
    }

    /// Creates a store already holding the built-in corpus.
    pub async fn seeded() -> Result<Self> {
        let setup = Self::new().await?;
        setup.seed().await?;
        Ok(setup)
    }

    pub async fn seed(&self) -> Result<KnowledgeBaseStatus> {
        Ok(ensure_knowledge_base(&self.store).await?)
    }

    /// Builds an advisor over this setup's store and history folder.
    pub fn advisor(&self, ai: MockAiProvider) -> Result<LegalAdvisor> {
        Ok(LegalAdvisorBuilder::new()
            .ai_provider(Box::new(ai))
            .knowledge_store(Box::new(self.store.clone()))
            .history_dir(self.history_dir.clone())
            .build()?)
    }

    /// The files currently in the history folder, sorted by name.
    pub fn history_files(&self) -> Result<Vec<PathBuf>> {
        if !self.history_dir.exists() {
            return Ok(Vec::new());
        }
        let mut files = std::fs::read_dir(&self.history_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        files.sort();
        Ok(files)
    }
}

/// Opens a store at `db_path` with the local hashing embedder.
pub async fn open_store(db_path: &std::path::Path) -> Result<SqliteKnowledgeStore> {
    let path = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("temp path is not valid UTF-8"))?;
    Ok(SqliteKnowledgeStore::new(path, Box::new(HashEmbedder::default())).await?)
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    default_response: Option<String>,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    /// A mock with no programmed responses; every call fails.
    pub fn new() -> Self {
        Self {
            default_response: None,
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock answering every call with `response`.
    pub fn answering(response: &str) -> Self {
        Self {
            default_response: Some(response.to_string()),
            ..Self::new()
        }
    }

    /// Pre-programs a response for prompts containing `key`.
    /// The key is matched against the user prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), response.to_string()));
    }

    /// Retrieves the recorded `(system, user)` prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }
        if let Some(response) = &self.default_response {
            return Ok(response.clone());
        }

        Err(PromptError::AiApi(
            "MockAiProvider: No response programmed for prompt.".to_string(),
        ))
    }
}
