//! # Provider Factory
//!
//! Turns the `llm` and `embedding` sections of the configuration into the
//! concrete model and embedder clients the advisor is built from.

use crate::config::{EmbeddingConfig, LlmConfig};
use legalrag::{
    embedding::{ApiEmbedder, Embedder, FastEmbedder, HashEmbedder},
    providers::ai::{
        gemini::GeminiProvider,
        local::{LocalAiProvider, DEFAULT_CHAT_COMPLETIONS_URL},
        AiProvider,
    },
};
use tracing::info;

/// Creates the chat model client described by `llm`.
pub fn create_ai_provider(llm: &LlmConfig) -> anyhow::Result<Box<dyn AiProvider>> {
    let provider: Box<dyn AiProvider> = match llm.provider.as_str() {
        "gemini" => {
            let api_key = llm
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("llm.api_key is required for the gemini provider"))?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = llm
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| GeminiProvider::url_for_model(&llm.model_name));
            info!(api_url = %api_url, "Configuring Gemini provider.");
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            let api_url = llm
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_CHAT_COMPLETIONS_URL.to_string());
            info!(api_url = %api_url, model = %llm.model_name, "Configuring OpenAI-compatible provider.");
            Box::new(LocalAiProvider::new(
                api_url,
                llm.api_key.clone(),
                Some(llm.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider type '{other}'"));
        }
    };
    Ok(provider)
}

/// Creates the embedder described by `embedding`.
///
/// The `fastembed` model is loaded here, so the first start may download it.
pub async fn create_embedder(embedding: &EmbeddingConfig) -> anyhow::Result<Box<dyn Embedder>> {
    match embedding.provider.as_str() {
        "fastembed" => {
            let cache_dir = embedding.cache_dir.clone().map(Into::into);
            Ok(Box::new(FastEmbedder::new(cache_dir).await?))
        }
        "hash" => Ok(Box::new(HashEmbedder::new(embedding.dimensions))),
        "api" => {
            let api_url = embedding
                .api_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("embedding.api_url is required for the api embedder"))?;
            let model_name = embedding.model_name.clone().ok_or_else(|| {
                anyhow::anyhow!("embedding.model_name is required for the api embedder")
            })?;
            Ok(Box::new(ApiEmbedder::new(
                api_url,
                model_name,
                embedding.api_key.clone(),
            )?))
        }
        other => Err(anyhow::anyhow!("Unsupported embedding provider '{other}'")),
    }
}
