use crate::{
    constants::{DEFAULT_HISTORY_DIR, DEFAULT_TOP_K},
    errors::PromptError,
    history::HistoryStore,
    knowledge::{Category, Provision},
    prompts::legal::{LEGAL_ANALYSIS_SYSTEM_PROMPT, LEGAL_ANALYSIS_USER_PROMPT},
    providers::{ai::AiProvider, db::storage::KnowledgeStore},
    session::CaseEntry,
};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

/// A provision as it sits in the knowledge store, with its generated id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProvision {
    pub id: String,
    #[serde(flatten)]
    pub provision: Provision,
}

/// One nearest-neighbour hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedProvision {
    pub provision: String,
    pub content: String,
    pub category: Category,
    /// Cosine distance to the query; lower is closer.
    pub distance: f64,
}

impl RetrievedProvision {
    /// Renders the hit as a `"title: content"` block for the prompt.
    pub fn as_block(&self) -> String {
        format!("{}: {}", self.provision, self.content)
    }
}

/// The provisions retrieved for a case, plus the text handed to the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedContext {
    pub provisions: Vec<RetrievedProvision>,
    /// The blocks of `provisions`, most similar first, joined by blank lines.
    pub text: String,
}

/// The outcome of analysing a single case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseAnalysis {
    pub case_description: String,
    pub provisions: Vec<RetrievedProvision>,
    /// The filled user prompt that was sent to the model.
    pub prompt: String,
    /// The model's raw response, unmodified.
    pub analysis: String,
}

/// A case that was analysed, written to disk and added to a session.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSubmission {
    pub entry: CaseEntry,
    pub history_file: PathBuf,
    pub provisions: Vec<RetrievedProvision>,
    /// The filled user prompt that was sent to the model.
    pub prompt: String,
}

/// The analysis engine: retrieves provisions, fills the prompt, calls the
/// model and records the result.
pub struct LegalAdvisor {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) knowledge_store: Box<dyn KnowledgeStore>,
    pub(crate) history_store: HistoryStore,
    pub(crate) top_k: u32,
    pub(crate) system_prompt: String,
    pub(crate) user_prompt: String,
}

impl fmt::Debug for LegalAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegalAdvisor")
            .field("ai_provider", &self.ai_provider)
            .field("knowledge_store", &self.knowledge_store)
            .field("history_store", &self.history_store)
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `LegalAdvisor` instances.
///
/// The AI provider and the knowledge store are required; everything else has
/// a default (top 8 provisions, the built-in prompt, `case_history/`).
#[derive(Default)]
pub struct LegalAdvisorBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    knowledge_store: Option<Box<dyn KnowledgeStore>>,
    history_dir: Option<PathBuf>,
    top_k: Option<u32>,
    system_prompt: Option<String>,
    user_prompt: Option<String>,
}

impl LegalAdvisorBuilder {
    /// Creates a new `LegalAdvisorBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use legalrag::LegalAdvisorBuilder;
    ///
    /// let builder = LegalAdvisorBuilder::new().top_k(8);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    pub fn knowledge_store(mut self, knowledge_store: Box<dyn KnowledgeStore>) -> Self {
        self.knowledge_store = Some(knowledge_store);
        self
    }

    /// Sets the folder history files are written to.
    pub fn history_dir(mut self, history_dir: impl Into<PathBuf>) -> Self {
        self.history_dir = Some(history_dir.into());
        self
    }

    /// Sets how many provisions are retrieved per case. Zero is treated as one.
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Overrides the per-case template. It should keep the
    /// `{case_description}` and `{legal_provisions}` placeholders.
    pub fn user_prompt(mut self, user_prompt: impl Into<String>) -> Self {
        self.user_prompt = Some(user_prompt.into());
        self
    }

    /// Builds the `LegalAdvisor`.
    pub fn build(self) -> Result<LegalAdvisor, PromptError> {
        let ai_provider = self.ai_provider.ok_or(PromptError::MissingAiProvider)?;
        let knowledge_store = self
            .knowledge_store
            .ok_or(PromptError::MissingKnowledgeStore)?;

        Ok(LegalAdvisor {
            ai_provider,
            knowledge_store,
            history_store: HistoryStore::new(
                self.history_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_DIR)),
            ),
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K).max(1),
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| LEGAL_ANALYSIS_SYSTEM_PROMPT.to_string()),
            user_prompt: self
                .user_prompt
                .unwrap_or_else(|| LEGAL_ANALYSIS_USER_PROMPT.to_string()),
        })
    }
}
