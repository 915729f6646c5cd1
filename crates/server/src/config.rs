//! # Application Configuration
//!
//! This module defines the configuration structure for the `legalrag-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables.

use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Map, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use legalrag::{
    constants::{DEFAULT_DB_FILE, DEFAULT_HISTORY_DIR, DEFAULT_TOP_K},
    embedding::DEFAULT_HASH_DIMENSIONS,
    prompts::legal::{LEGAL_ANALYSIS_SYSTEM_PROMPT, LEGAL_ANALYSIS_USER_PROMPT},
    providers::ai::local::{DEFAULT_CHAT_COMPLETIONS_URL, DEFAULT_CHAT_MODEL},
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the knowledge store file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// The folder receiving one JSON file per case. Loaded from `HISTORY_DIR`.
    #[serde(default = "default_history_dir")]
    pub history_dir: String,
    /// Provisions retrieved per case. Loaded from `TOP_K`.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    pub prompts: PromptsConfig,
}

fn default_port() -> u16 {
    9090
}

fn default_db_url() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_history_dir() -> String {
    DEFAULT_HISTORY_DIR.to_string()
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

/// How provision texts are turned into vectors.
#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    /// `"fastembed"` for the local sentence model, `"api"` for a hosted
    /// endpoint, `"hash"` for the offline word-hashing stand-in.
    #[serde(default = "default_embedding_provider")]
    pub provider: String,
    /// Where `fastembed` keeps downloaded model files.
    #[serde(default)]
    pub cache_dir: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Vector width of the hashing embedder.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

fn default_embedding_provider() -> String {
    "fastembed".to_string()
}

fn default_dimensions() -> usize {
    DEFAULT_HASH_DIMENSIONS
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            cache_dir: None,
            api_url: None,
            model_name: None,
            api_key: None,
            dimensions: default_dimensions(),
        }
    }
}

/// The hosted chat model that writes the analysis.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// The type of provider (`"local"` for OpenAI-compatible APIs, `"gemini"`).
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key. An empty key is sent as no key.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_llm_provider() -> String {
    "local".to_string()
}

fn default_model_name() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_url: Some(DEFAULT_CHAT_COMPLETIONS_URL.to_string()),
            api_key: None,
            model_name: default_model_name(),
        }
    }
}

/// The prompt pair sent with every case.
#[derive(Debug, Deserialize, Clone)]
pub struct PromptsConfig {
    pub system_prompt: String,
    /// Must keep the `{case_description}` and `{legal_provisions}` placeholders.
    pub user_prompt: String,
}

/// Constructs the `config::Value` table of the built-in prompts. This serves
/// as the base layer of configuration.
fn build_default_prompts() -> HashMap<String, ConfigValue> {
    [
        ("system_prompt", LEGAL_ANALYSIS_SYSTEM_PROMPT),
        ("user_prompt", LEGAL_ANALYSIS_USER_PROMPT),
    ]
    .into_iter()
    .map(|(key, prompt)| {
        (
            key.to_string(),
            ConfigValue::new(None, ConfigValueKind::String(prompt.to_string())),
        )
    })
    .collect()
}

/// Plain environment variables that override top-level keys.
const TOP_LEVEL_ENV_VARS: &[&str] = &["PORT", "DB_URL", "HISTORY_DIR", "TOP_K"];

/// Collects the set variables of [`TOP_LEVEL_ENV_VARS`]. Any other variable in
/// the process environment is ignored.
fn top_level_env() -> Map<String, String> {
    TOP_LEVEL_ENV_VARS
        .iter()
        .filter_map(|var| env::var(var).ok().map(|value| (var.to_string(), value)))
        .collect()
}

// Reads a file and substitutes `${VAR}` with the environment value (empty if unset).
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, later ones winning:
/// 1. Built-in defaults (prompts, port, paths, top-k).
/// 2. `config.yml` next to the crate, or `config_path_override`. A missing
///    default file is skipped; a missing override is an error.
/// 3. Top-level keys from the plain environment variables `PORT`, `DB_URL`,
///    `HISTORY_DIR` and `TOP_K`. No other unprefixed variable is read.
/// 4. Nested keys from `LEGALRAG_...` variables (e.g. `LEGALRAG_LLM__MODEL_NAME`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("prompts", build_default_prompts())?;

    // Layer 2: Main config file.
    let main_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            let content = read_and_substitute(&user_config_path)?;
            if content.is_some() {
                info!("Loading configuration from '{user_config_path}'.");
            } else {
                info!("'{user_config_path}' not found. Using built-in defaults.");
            }
            content
        }
    };
    if let Some(content) = main_content {
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 3: Top-level keys such as PORT and TOP_K.
        .add_source(
            Environment::default()
                .source(Some(top_level_env()))
                .try_parsing(true),
        )
        // Layer 4: Prefixed variables for nested overrides.
        .add_source(
            Environment::with_prefix("LEGALRAG")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
