use super::{handlers, state::AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/sessions", post(handlers::create_session_handler))
        .route("/api/sessions/{id}", delete(handlers::end_session_handler))
        .route(
            "/api/sessions/{id}/history",
            get(handlers::session_history_handler),
        )
        .route(
            "/api/sessions/{id}/cases",
            post(handlers::submit_case_handler),
        )
        .route(
            "/api/provisions/search",
            post(handlers::provision_search_handler),
        )
        .route("/api/provisions", get(handlers::list_provisions_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
