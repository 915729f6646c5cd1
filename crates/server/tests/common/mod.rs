//! # Common Test Utilities
//!
//! `TestApp` spawns the real server on a random port against a throwaway
//! knowledge store and history folder, with the chat model replaced by an
//! `httpmock::MockServer`. Each test programs the mock it needs.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use legalrag_server::{
    config::{self, AppConfig},
    router,
    state::{build_app_state, AppState},
};
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The chat completions path the mock model answers on.
pub const CHAT_PATH: &str = "/v1/chat/completions";

pub const LANDLORD_CASE: &str = "My landlord is refusing to return my security deposit of Rs. 50,000 after I vacated the apartment. The rental agreement clearly states the deposit should be returned within 30 days. It's been 3 months now.";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub app_state: AppState,
    _dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Writes a config file pointing every path into `dir` and the model at `mock_server`.
pub fn write_test_config(dir: &TempDir, mock_server: &MockServer) -> Result<PathBuf> {
    let config_path = dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
db_url: "{}"
history_dir: "{}"
top_k: 8
embedding:
  provider: "hash"
llm:
  provider: "local"
  api_url: "{}"
  api_key: ""
  model_name: "mock-chat-model"
"#,
        dir.path().join("legal_vectorstore").join("legal.db").display(),
        dir.path().join("case_history").display(),
        mock_server.url(CHAT_PATH)
    );
    fs::write(&config_path, config_content)?;
    Ok(config_path)
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .with_test_writer()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let dir = tempdir()?;
        let config_path = write_test_config(&dir, &mock_server)?;
        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config.clone()).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            config,
            config_path,
            app_state: app_state_for_harness,
            _dir: dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn history_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.history_dir)
    }

    /// Files currently in the history folder.
    pub fn history_files(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.history_dir()) {
            Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Opens a session and returns its id.
    pub async fn create_session(&self) -> Result<String> {
        let body: Value = self
            .client
            .post(self.url("/api/sessions"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body["result"]["session_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("no session id in {body}"))
    }

    pub async fn submit_case(&self, session_id: &str, case: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(&format!("/api/sessions/{session_id}/cases")))
            .json(&json!({ "case_description": case }))
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An OpenAI-style chat completion body carrying `content`.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}
