//! # Case Session Handlers
//!
//! A browser tab opens a session, submits cases into it and closes it when the
//! tab goes away. The history shown in the sidebar is read from the session
//! only; files in the history folder are never read back.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::markdown::render_analysis;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use legalrag::{CaseEntry, RetrievedProvision};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// Characters of the description shown in a sidebar label.
const LABEL_PREVIEW_CHARS: usize = 50;

// --- API Payloads for Sessions ---

#[derive(Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Serialize, Deserialize)]
pub struct SessionEnded {
    pub session_id: Uuid,
}

/// One sidebar entry.
#[derive(Serialize, Deserialize)]
pub struct HistoryItem {
    /// 1-based position in the session.
    pub number: usize,
    /// `Case N: <first 50 chars>...`
    pub label: String,
    /// The analysis rendered from markdown for display.
    pub analysis_html: String,
    #[serde(flatten)]
    pub entry: CaseEntry,
}

impl HistoryItem {
    fn new(index: usize, entry: &CaseEntry) -> Self {
        let number = index + 1;
        Self {
            number,
            label: format!("Case {number}: {}", entry.preview(LABEL_PREVIEW_CHARS)),
            analysis_html: render_analysis(&entry.analysis),
            entry: entry.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct CaseRequest {
    pub case_description: String,
}

#[derive(Serialize, Deserialize)]
pub struct CaseResponse {
    #[serde(flatten)]
    pub item: HistoryItem,
    /// The provisions the analysis was grounded on, most similar first.
    pub provisions: Vec<RetrievedProvision>,
    /// File name of the history record, inside the history folder.
    pub history_file: String,
}

// --- Session Handlers ---

/// Handler for `POST /api/sessions`.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> (StatusCode, Json<ApiResponse<SessionCreated>>) {
    let session_id = app_state.sessions.create().await;
    info!(%session_id, "Session started.");
    let debug_info = json!({ "live_sessions": app_state.sessions.live_count().await });
    (
        StatusCode::CREATED,
        wrap_response(SessionCreated { session_id }, debug_params, Some(debug_info)),
    )
}

/// Handler for `DELETE /api/sessions/{id}`. The session's in-memory history is
/// discarded; history files stay on disk.
pub async fn end_session_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<SessionEnded>>, AppError> {
    if !app_state.sessions.remove(&session_id).await {
        return Err(AppError::SessionNotFound(session_id));
    }
    info!(%session_id, "Session ended.");
    Ok(wrap_response(SessionEnded { session_id }, debug_params, None))
}

/// Handler for `GET /api/sessions/{id}/history`.
pub async fn session_history_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<HistoryItem>>>, AppError> {
    let session = app_state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound(session_id))?;
    let session = session.lock().await;
    let items = session
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryItem::new(index, entry))
        .collect();
    let debug_info = json!({ "created_at": session.created_at() });
    Ok(wrap_response(items, debug_params, Some(debug_info)))
}

/// Handler for `POST /api/sessions/{id}/cases`: analyses one case and records it.
pub async fn submit_case_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<CaseRequest>,
) -> Result<Json<ApiResponse<CaseResponse>>, AppError> {
    let session = app_state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound(session_id))?;
    info!(%session_id, "Received case submission.");

    let mut session = session.lock().await;
    let submission = app_state
        .advisor
        .submit_case(&mut session, &payload.case_description)
        .await?;

    let history_file = submission
        .history_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let response = CaseResponse {
        item: HistoryItem::new(session.len() - 1, &submission.entry),
        provisions: submission.provisions,
        history_file,
    };
    let debug_info = json!({
        "prompt": submission.prompt,
        "top_k": app_state.advisor.top_k(),
    });
    Ok(wrap_response(response, debug_params, Some(debug_info)))
}
