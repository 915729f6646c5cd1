use thiserror::Error;

/// Errors raised while talking to a hosted model or embedding endpoint.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing for provider '{0}'")]
    MissingApiKey(String),
    #[error("AI provider is not configured")]
    MissingAiProvider,
    #[error("Knowledge store is not configured")]
    MissingKnowledgeStore,
    #[error("Local embedding model failed: {0}")]
    LocalEmbedding(String),
}

/// Errors raised by the vector-backed knowledge store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("Storage connection error: {0}")]
    Connection(String),
    #[error("Embedding generation failed: {0}")]
    Embedding(#[from] PromptError),
    #[error("The knowledge base is empty; no provisions can be retrieved.")]
    EmptyKnowledgeBase,
    #[error("The text contains nothing to search on. Describe the situation in words.")]
    UnsearchableQuery,
    #[error("Unknown provision category '{0}'")]
    UnknownCategory(String),
    #[error("Failed to decode stored row: {0}")]
    RowDecode(String),
    #[error("Got {ids} ids for {provisions} provisions")]
    LengthMismatch { ids: usize, provisions: usize },
}

/// Errors raised while persisting case history to disk.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to write case history: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize case history: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The error taxonomy surfaced by a case analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("The case description is empty.")]
    EmptyCaseDescription,
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] StoreError),
    #[error("Model call failed: {0}")]
    Model(#[from] PromptError),
    #[error("Saving case history failed: {0}")]
    History(#[from] HistoryError),
}
