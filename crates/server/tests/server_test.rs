//! # Server Endpoint Tests
//!
//! End-to-end tests of the HTTP surface: the page, session lifecycle, case
//! submission against a mocked model, error mapping and provision lookups.

mod common;

use anyhow::Result;
use common::{chat_completion, write_test_config, TestApp, CHAT_PATH, LANDLORD_CASE};
use httpmock::{Method::POST, MockServer};
use legalrag::constants::RETRY_HINT;
use legalrag::providers::db::storage::KnowledgeStore;
use legalrag_server::{config, state::build_app_state};
use serde_json::{json, Value};

const ANALYSIS: &str = "1. **Case Summary**: Deposit withheld for three months.\n2. **Applicable Laws**: Section 73 of the Indian Contract Act.";

#[tokio::test]
async fn test_root_and_health_check_endpoints() -> Result<()> {
    let app = TestApp::spawn().await?;

    let root_response = app.client.get(app.url("/")).send().await?;
    assert!(root_response.status().is_success());
    let page = root_response.text().await?;
    assert!(page.contains("Analyze Case"));
    assert!(page.contains("No case history yet. Submit a case to begin."));

    let health_response = app.client.get(app.url("/health")).send().await?;
    assert!(health_response.status().is_success());
    assert_eq!("OK", health_response.text().await?);
    Ok(())
}

#[tokio::test]
async fn test_submit_case_end_to_end() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;
    let chat_mock = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .json_body_partial(r#"{"temperature": 0.0, "model": "mock-chat-model"}"#)
                .body_contains("My landlord is refusing");
            then.status(200).json_body(chat_completion(ANALYSIS));
        })
        .await;
    let session_id = app.create_session().await?;

    // --- 2. Act ---
    let response = app.submit_case(&session_id, LANDLORD_CASE).await?;

    // --- 3. Assert ---
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    let result = &body["result"];
    assert_eq!(result["analysis"], ANALYSIS);
    let analysis_html = result["analysis_html"].as_str().unwrap();
    assert!(analysis_html.contains("<strong>Case Summary</strong>"));
    assert!(!analysis_html.contains("**"));
    assert_eq!(result["case_description"], LANDLORD_CASE);
    assert_eq!(result["number"], 1);
    assert_eq!(result["provisions"].as_array().unwrap().len(), 8);
    assert!(body.get("debug").is_none());
    chat_mock.assert_hits_async(1).await;

    let history_file = result["history_file"].as_str().unwrap();
    assert!(history_file.starts_with("case_") && history_file.ends_with(".json"));
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(app.history_dir().join(history_file))?)?;
    assert_eq!(saved["analysis"], ANALYSIS);
    assert_eq!(saved["case_description"], LANDLORD_CASE);

    let history: Value = app
        .client
        .get(app.url(&format!("/api/sessions/{session_id}/history")))
        .send()
        .await?
        .json()
        .await?;
    let items = history["result"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let expected_label = format!(
        "Case 1: {}...",
        LANDLORD_CASE.chars().take(50).collect::<String>()
    );
    assert_eq!(items[0]["label"], expected_label.as_str());
    assert_eq!(items[0]["analysis"], ANALYSIS);
    Ok(())
}

#[tokio::test]
async fn test_debug_flag_exposes_prompt() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200).json_body(chat_completion("advice"));
        })
        .await;
    let session_id = app.create_session().await?;

    let body: Value = app
        .client
        .post(app.url(&format!("/api/sessions/{session_id}/cases?debug=true")))
        .json(&json!({ "case_description": "My employer withheld my provident fund." }))
        .send()
        .await?
        .json()
        .await?;
    let prompt = body["debug"]["prompt"].as_str().unwrap();
    assert!(prompt.contains("**Case Details:**\nMy employer withheld my provident fund."));
    assert_eq!(body["debug"]["top_k"], 8);
    Ok(())
}

#[tokio::test]
async fn test_empty_case_is_rejected_without_model_call() -> Result<()> {
    let app = TestApp::spawn().await?;
    let chat_mock = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200).json_body(chat_completion("unused"));
        })
        .await;
    let session_id = app.create_session().await?;

    let response = app.submit_case(&session_id, "   \n ").await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["hint"], RETRY_HINT);

    // Punctuation alone gives retrieval nothing to rank by.
    let response = app.submit_case(&session_id, "???").await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("nothing to search on"));

    chat_mock.assert_hits_async(0).await;
    assert!(app.history_files().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_model_failure_maps_to_bad_gateway() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(500).body("upstream exploded");
        })
        .await;
    let session_id = app.create_session().await?;

    let response = app.submit_case(&session_id, LANDLORD_CASE).await?;

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("upstream exploded"));
    assert_eq!(body["hint"], RETRY_HINT);
    assert!(app.history_files().is_empty());

    let history: Value = app
        .client
        .get(app.url(&format!("/api/sessions/{session_id}/history")))
        .send()
        .await?
        .json()
        .await?;
    assert!(history["result"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sessions_are_isolated_and_can_end() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200).json_body(chat_completion("advice"));
        })
        .await;
    let first = app.create_session().await?;
    let second = app.create_session().await?;
    assert_ne!(first, second);

    app.submit_case(&first, LANDLORD_CASE).await?.error_for_status()?;

    let second_history: Value = app
        .client
        .get(app.url(&format!("/api/sessions/{second}/history")))
        .send()
        .await?
        .json()
        .await?;
    assert!(second_history["result"].as_array().unwrap().is_empty());

    let ended = app
        .client
        .delete(app.url(&format!("/api/sessions/{first}")))
        .send()
        .await?;
    assert_eq!(ended.status(), 200);

    // The ended session is gone for every route.
    let again = app
        .client
        .delete(app.url(&format!("/api/sessions/{first}")))
        .send()
        .await?;
    assert_eq!(again.status(), 404);
    let history = app
        .client
        .get(app.url(&format!("/api/sessions/{first}/history")))
        .send()
        .await?;
    assert_eq!(history.status(), 404);
    let submit = app.submit_case(&first, LANDLORD_CASE).await?;
    assert_eq!(submit.status(), 404);

    // History files outlive the session.
    assert_eq!(app.history_files().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_provision_search_and_listing() -> Result<()> {
    let app = TestApp::spawn().await?;

    let search: Value = app
        .client
        .post(app.url("/api/provisions/search?debug=true"))
        .json(&json!({ "query": "patent for my invention", "limit": 3 }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(search["result"].as_array().unwrap().len(), 3);
    assert_eq!(search["debug"]["limit"], 3);

    let default_limit: Value = app
        .client
        .post(app.url("/api/provisions/search"))
        .json(&json!({ "query": "bail after arrest" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(default_limit["result"].as_array().unwrap().len(), 8);

    let all: Value = app
        .client
        .get(app.url("/api/provisions"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(all["result"].as_array().unwrap().len(), 36);

    let family: Value = app
        .client
        .get(app.url("/api/provisions?category=family_law"))
        .send()
        .await?
        .json()
        .await?;
    let family = family["result"].as_array().unwrap();
    assert_eq!(family.len(), 4);
    assert!(family.iter().all(|p| p["category"] == "family_law"));

    let unknown = app
        .client
        .get(app.url("/api/provisions?category=space_law"))
        .send()
        .await?;
    assert_eq!(unknown.status(), 400);
    Ok(())
}

#[tokio::test]
async fn test_restart_reuses_knowledge_base() -> Result<()> {
    let mock_server = MockServer::start_async().await;
    let dir = tempfile::tempdir()?;
    let config_path = write_test_config(&dir, &mock_server)?;
    let config = config::get_config(Some(config_path.to_str().unwrap()))?;

    let first = build_app_state(config.clone()).await?;
    assert_eq!(first.advisor.knowledge_store().count().await?, 36);
    drop(first);

    // A second startup against the same files finds the corpus and adds nothing.
    let restarted = build_app_state(config).await?;
    assert_eq!(restarted.advisor.knowledge_store().count().await?, 36);
    Ok(())
}
