//! # Indian Legal Advisor
//!
//! This crate answers free-text legal case descriptions with a structured
//! analysis grounded in Indian law. It keeps a small curated knowledge base of
//! statutory provisions in a local vector store, retrieves the provisions
//! nearest to each case, and asks a hosted chat model to write the analysis.
//! Every analysed case is written to a JSON file and appended to the caller's
//! [`CaseSession`].

pub mod constants;
pub mod embedding;
pub mod errors;
pub mod history;
pub mod knowledge;
pub mod prompts;
pub mod providers;
pub mod retriever;
pub mod session;
pub mod types;

pub use errors::{AnalysisError, HistoryError, PromptError, StoreError};
pub use history::HistoryStore;
pub use knowledge::{Category, KnowledgeBaseStatus, Provision};
pub use session::{CaseEntry, CaseSession};
pub use types::{
    CaseAnalysis, CaseSubmission, LegalAdvisor, LegalAdvisorBuilder, RetrievedContext,
    RetrievedProvision, StoredProvision,
};

use prompts::legal::fill_legal_analysis_prompt;
use providers::db::storage::KnowledgeStore;
use tracing::{debug, error, info};

impl LegalAdvisor {
    /// Populates the knowledge store with the built-in corpus if it is empty.
    pub async fn ensure_knowledge_base(&self) -> Result<KnowledgeBaseStatus, StoreError> {
        knowledge::ensure_knowledge_base(self.knowledge_store.as_ref()).await
    }

    /// Retrieves the configured number of provisions nearest to `case_description`.
    pub async fn retrieve_provisions(
        &self,
        case_description: &str,
    ) -> Result<RetrievedContext, StoreError> {
        retriever::retrieve_provisions(self.knowledge_store.as_ref(), case_description, self.top_k)
            .await
    }

    /// Runs retrieval and the model call for one case.
    ///
    /// Empty or whitespace-only descriptions are rejected before anything else
    /// happens. The model's text is returned exactly as received.
    pub async fn analyze_case(&self, case_description: &str) -> Result<CaseAnalysis, AnalysisError> {
        if case_description.trim().is_empty() {
            return Err(AnalysisError::EmptyCaseDescription);
        }

        info!(
            chars = case_description.chars().count(),
            "[analyze_case] Analyzing case."
        );
        let context = self.retrieve_provisions(case_description).await?;
        let prompt = fill_legal_analysis_prompt(&self.user_prompt, case_description, &context.text);
        debug!("[analyze_case] Prompt: {prompt}");

        let analysis = self
            .ai_provider
            .generate(&self.system_prompt, &prompt)
            .await
            .inspect_err(|e| error!("[analyze_case] Model call failed: {e}"))?;

        Ok(CaseAnalysis {
            case_description: case_description.to_string(),
            provisions: context.provisions,
            prompt,
            analysis,
        })
    }

    /// Analyses a case, writes it to the history folder and appends it to
    /// `session`.
    ///
    /// On any failure nothing is written and the session is left untouched.
    pub async fn submit_case(
        &self,
        session: &mut CaseSession,
        case_description: &str,
    ) -> Result<CaseSubmission, AnalysisError> {
        let analysis = self.analyze_case(case_description).await?;
        let entry = CaseEntry::new(analysis.case_description, analysis.analysis);
        let history_file = self.history_store.save(&entry).await?;
        session.push(entry.clone());
        info!(
            session = %session.id(),
            cases = session.len(),
            "[submit_case] Case recorded."
        );
        Ok(CaseSubmission {
            entry,
            history_file,
            provisions: analysis.provisions,
            prompt: analysis.prompt,
        })
    }

    /// Nearest-neighbour search over the knowledge base without a model call.
    pub async fn search_provisions(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RetrievedProvision>, StoreError> {
        self.knowledge_store.query(query, limit.max(1)).await
    }

    /// Lists stored provisions, optionally for a single category.
    pub async fn list_provisions(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<StoredProvision>, StoreError> {
        self.knowledge_store.list(category).await
    }

    pub fn knowledge_store(&self) -> &dyn KnowledgeStore {
        self.knowledge_store.as_ref()
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }
}
