//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup: the configured advisor, the knowledge store it
//! reads from, and the registry of live case sessions.

use crate::{
    config::AppConfig,
    providers::{create_ai_provider, create_embedder},
};
use legalrag::{
    providers::db::sqlite::SqliteKnowledgeStore, CaseSession, LegalAdvisor, LegalAdvisorBuilder,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

/// One live session. The mutex is held for the whole of a submission so cases
/// within a session are recorded in the order they were submitted.
pub type SharedSession = Arc<Mutex<CaseSession>>;

/// Live case sessions keyed by id. Sessions exist from `POST /api/sessions`
/// until `DELETE /api/sessions/{id}`.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh session and returns its id.
    pub async fn create(&self) -> Uuid {
        let session = CaseSession::new();
        let id = session.id();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drops a session and its history. Returns whether it existed.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of sessions currently open.
    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The analysis engine shared by all sessions.
    pub advisor: Arc<LegalAdvisor>,
    pub sessions: SessionRegistry,
}

/// Builds the shared application state from the configuration.
///
/// Opens the knowledge store, populates it on first launch, and builds the
/// advisor around the configured model.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider = create_ai_provider(&config.llm)?;
    let embedder = create_embedder(&config.embedding).await?;

    let store = SqliteKnowledgeStore::new(&config.db_url, embedder).await?;
    info!(db_path = %config.db_url, "Initialized knowledge store (SQLite).");

    let advisor = LegalAdvisorBuilder::new()
        .ai_provider(ai_provider)
        .knowledge_store(Box::new(store))
        .history_dir(&config.history_dir)
        .top_k(config.top_k)
        .system_prompt(config.prompts.system_prompt.clone())
        .user_prompt(config.prompts.user_prompt.clone())
        .build()?;

    let status = advisor.ensure_knowledge_base().await?;
    info!(?status, "Knowledge base ready.");

    Ok(AppState {
        config: Arc::new(config),
        advisor: Arc::new(advisor),
        sessions: SessionRegistry::new(),
    })
}
