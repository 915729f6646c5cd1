//! # Text Embedding
//!
//! Embedders turn provision text and case descriptions into vectors for the
//! knowledge store. Three implementations are provided:
//!
//! - [`FastEmbedder`]: the all-MiniLM-L6-v2 sentence model run locally through
//!   `fastembed`. This is the default.
//! - [`ApiEmbedder`]: calls an OpenAI-compatible `/embeddings` endpoint or the
//!   Gemini `embedContent` endpoint.
//! - [`HashEmbedder`]: a feature-hashing stand-in with no model download, for
//!   tests and offline runs. It only matches shared words, not meaning.
//!
//! Vectors from different embedders are not comparable. A store populated with
//! one embedder must be queried with the same one.

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug},
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing::{debug, info};

/// Default width of [`HashEmbedder`] vectors.
pub const DEFAULT_HASH_DIMENSIONS: usize = 384;

/// The name stored next to vectors produced by [`FastEmbedder`].
pub const FASTEMBED_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// A trait for turning text into an embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync + Debug + DynClone {
    /// Embeds a single piece of text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError>;

    /// The name recorded next to every stored vector.
    fn model_name(&self) -> &str;
}

dyn_clone::clone_trait_object!(Embedder);

// --- Local sentence embedder ---

/// Embeds text with all-MiniLM-L6-v2 (384 dimensions) on the local CPU.
///
/// The ONNX weights are fetched into the cache directory on first use.
/// `TextEmbedding::embed` needs exclusive access and blocks, so the model sits
/// behind a mutex and every call runs on tokio's blocking pool.
#[derive(Clone)]
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Loads the model, downloading it into `cache_dir` (or fastembed's default
    /// cache) if it is not there yet.
    pub async fn new(cache_dir: Option<PathBuf>) -> Result<Self, PromptError> {
        let model = tokio::task::spawn_blocking(move || {
            let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_show_download_progress(false);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir);
            }
            TextEmbedding::try_new(options)
        })
        .await
        .map_err(|e| PromptError::LocalEmbedding(e.to_string()))?
        .map_err(|e| PromptError::LocalEmbedding(e.to_string()))?;

        info!(model = FASTEMBED_MODEL_NAME, "Loaded local embedding model.");
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Debug for FastEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastEmbedder")
            .field("model", &FASTEMBED_MODEL_NAME)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| PromptError::LocalEmbedding("embedding model lock poisoned".into()))?;
            let mut vectors = model
                .embed(vec![text], None)
                .map_err(|e| PromptError::LocalEmbedding(e.to_string()))?;
            vectors
                .pop()
                .ok_or_else(|| PromptError::LocalEmbedding("model returned no vector".into()))
        })
        .await
        .map_err(|e| PromptError::LocalEmbedding(e.to_string()))?
    }

    fn model_name(&self) -> &str {
        FASTEMBED_MODEL_NAME
    }
}

// --- Local hashing embedder ---

/// Embeds text by hashing lowercase alphanumeric tokens into signed buckets
/// and L2-normalising the result.
///
/// Texts sharing vocabulary land close together under cosine distance, and an
/// identical text always maps to an identical vector.
#[derive(Clone, Debug)]
pub struct HashEmbedder {
    dimensions: usize,
    model_name: String,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        let dimensions = dimensions.max(1);
        Self {
            dimensions,
            model_name: format!("hash-fnv1a-{dimensions}"),
        }
    }

    /// The synchronous core of [`Embedder::embed`].
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for raw_token in text.split(|c: char| !c.is_alphanumeric()) {
            if raw_token.is_empty() {
                continue;
            }
            let token = raw_token.to_lowercase();
            let hash = fnv1a_hash(token.as_bytes());
            let index = (hash % self.dimensions as u64) as usize;
            // The top bit picks the sign so it stays independent of the bucket.
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }

        let magnitude = vector.iter().map(|c| c * c).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for component in &mut vector {
                *component /= magnitude;
            }
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIMENSIONS)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError> {
        Ok(self.embed_text(text))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn fnv1a_hash(bytes: &[u8]) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

// --- Remote embedder ---

#[derive(Serialize, Debug)]
struct OpenAiEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize, Debug)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Deserialize, Debug)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize, Debug)]
struct GeminiEmbeddingRequest<'a> {
    model: String,
    content: GeminiEmbeddingContent<'a>,
}

#[derive(Serialize, Debug)]
struct GeminiEmbeddingContent<'a> {
    parts: Vec<GeminiEmbeddingPart<'a>>,
}

#[derive(Serialize, Debug)]
struct GeminiEmbeddingPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GeminiEmbeddingResponse {
    embedding: GeminiEmbeddingValue,
}

#[derive(Deserialize, Debug)]
struct GeminiEmbeddingValue {
    values: Vec<f32>,
}

/// An embedder backed by a hosted embeddings API.
#[derive(Clone, Debug)]
pub struct ApiEmbedder {
    client: ReqwestClient,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl ApiEmbedder {
    pub fn new(api_url: String, model: String, api_key: Option<String>) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            model,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn is_gemini(&self) -> bool {
        self.api_url.contains("generativelanguage.googleapis.com")
    }

    async fn embed_gemini(&self, input: &str) -> Result<Vec<f32>, PromptError> {
        let model = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        let request_body = GeminiEmbeddingRequest {
            model,
            content: GeminiEmbeddingContent {
                parts: vec![GeminiEmbeddingPart { text: input }],
            },
        };
        debug!(payload = ?request_body, "--> Sending request to Gemini Embeddings API");

        let mut request_builder = self.client.post(&self.api_url).json(&request_body);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.header("x-goog-api-key", key);
        }
        let response = request_builder
            .send()
            .await
            .map_err(PromptError::AiRequest)?;
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        let body: GeminiEmbeddingResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;
        Ok(body.embedding.values)
    }

    async fn embed_openai(&self, input: &str) -> Result<Vec<f32>, PromptError> {
        let request_body = OpenAiEmbeddingRequest {
            model: &self.model,
            input,
        };
        debug!(payload = ?request_body, "--> Sending request to OpenAI-compatible Embeddings API");

        let mut request_builder = self.client.post(&self.api_url).json(&request_body);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }
        let response = request_builder
            .send()
            .await
            .map_err(PromptError::AiRequest)?;
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        let body: OpenAiEmbeddingResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;
        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| PromptError::AiApi("embeddings API returned no data".to_string()))
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError> {
        if self.is_gemini() {
            self.embed_gemini(text).await
        } else {
            self.embed_openai(text).await
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
