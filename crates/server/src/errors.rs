use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legalrag::{constants::RETRY_HINT, AnalysisError, HistoryError, PromptError, StoreError};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

/// A custom error type for the server application.
///
/// Each variant maps to one HTTP status; every error body carries the message
/// and a hint the page shows next to it.
pub enum AppError {
    /// A case analysis failed somewhere along the pipeline.
    Analysis(AnalysisError),
    /// A knowledge-base lookup failed.
    Store(StoreError),
    /// The session id is not (or no longer) registered.
    SessionNotFound(Uuid),
    /// The request was well-formed JSON but unusable.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Analysis(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

fn store_status(err: &StoreError) -> (StatusCode, String) {
    match err {
        StoreError::EmptyKnowledgeBase => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        StoreError::UnknownCategory(_) | StoreError::UnsearchableQuery => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        StoreError::Embedding(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Embedding provider error: {e}"),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Knowledge store error: {err}"),
        ),
    }
}

fn prompt_status(err: &PromptError) -> (StatusCode, String) {
    match err {
        PromptError::MissingAiProvider
        | PromptError::MissingKnowledgeStore
        | PromptError::MissingApiKey(_)
        | PromptError::ReqwestClientBuild(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server is not configured correctly.".to_string(),
        ),
        PromptError::AiRequest(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Request to AI provider failed: {e}"),
        ),
        PromptError::AiDeserialization(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Failed to deserialize AI provider response: {e}"),
        ),
        PromptError::AiApi(e) => (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}")),
        PromptError::LocalEmbedding(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Local embedding model failed: {e}"),
        ),
    }
}

fn history_status(err: &HistoryError) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Could not save case history: {err}"),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match &self {
            AppError::Analysis(err) => {
                error!("AnalysisError: {:?}", err);
                match err {
                    AnalysisError::EmptyCaseDescription => {
                        (StatusCode::BAD_REQUEST, err.to_string())
                    }
                    AnalysisError::Retrieval(e) => store_status(e),
                    AnalysisError::Model(e) => prompt_status(e),
                    AnalysisError::History(e) => history_status(e),
                }
            }
            AppError::Store(err) => {
                error!("StoreError: {:?}", err);
                store_status(err)
            }
            AppError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Session '{id}' was not found."),
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "hint": RETRY_HINT,
        }));

        (status_code, body).into_response()
    }
}
