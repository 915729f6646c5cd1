//! # legalrag: command-line access to the legal advisor
//!
//! Populates the knowledge store, searches it, lists it, and analyses single
//! cases from the terminal. Every option falls back to an environment variable,
//! and `.env` is read on startup.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use legalrag::{
    constants::{DEFAULT_DB_FILE, DEFAULT_HISTORY_DIR, DEFAULT_TOP_K},
    embedding::{ApiEmbedder, Embedder, FastEmbedder, HashEmbedder, DEFAULT_HASH_DIMENSIONS},
    providers::{
        ai::{
            gemini::GeminiProvider,
            local::{LocalAiProvider, DEFAULT_CHAT_COMPLETIONS_URL, DEFAULT_CHAT_MODEL},
            AiProvider,
        },
        db::{sqlite::SqliteKnowledgeStore, storage::KnowledgeStore},
    },
    Category, CaseSession, KnowledgeBaseStatus, LegalAdvisor, LegalAdvisorBuilder,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Populate the knowledge store with the built-in provisions if it is empty
    Init,
    /// Find the provisions closest to a text, without calling a model
    Search(SearchArgs),
    /// Analyse a case, print the analysis and save it to the history folder
    Analyze(AnalyzeArgs),
    /// List stored provisions
    Provisions(ProvisionsArgs),
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Path of the knowledge store database
    #[arg(long, env = "DB_URL", default_value = DEFAULT_DB_FILE, global = true)]
    db_url: String,
    /// Local embedder used when no embeddings API is configured
    #[arg(long, env = "EMBEDDER", value_enum, default_value_t = LocalEmbedder::Fastembed, global = true)]
    embedder: LocalEmbedder,
    /// Where the local sentence model is cached
    #[arg(long, env = "FASTEMBED_CACHE_DIR", global = true)]
    model_cache_dir: Option<String>,
    /// Base URL of a hosted embeddings API; takes precedence over --embedder
    #[arg(long, env = "EMBEDDINGS_API_URL", global = true)]
    embeddings_api_url: Option<String>,
    /// Model name for the hosted embeddings API
    #[arg(long, env = "EMBEDDINGS_MODEL", global = true)]
    embeddings_model: Option<String>,
    /// Vector width of the hashing embedder
    #[arg(long, env = "EMBEDDING_DIMENSIONS", default_value_t = DEFAULT_HASH_DIMENSIONS, global = true)]
    embedding_dimensions: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LocalEmbedder {
    /// all-MiniLM-L6-v2 sentence embeddings
    Fastembed,
    /// Word hashing with no model download
    Hash,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// The text to search for
    text: String,
    /// How many provisions to return
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    limit: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LlmProvider {
    /// Any OpenAI-compatible chat completions API
    Local,
    Gemini,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// The case description
    text: String,
    /// Folder receiving the history file
    #[arg(long, env = "HISTORY_DIR", default_value = DEFAULT_HISTORY_DIR)]
    history_dir: String,
    /// Provisions retrieved for the case
    #[arg(long, env = "TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: u32,
    #[arg(long, env = "AI_PROVIDER", value_enum, default_value_t = LlmProvider::Local)]
    provider: LlmProvider,
    /// Chat endpoint; derived from the model for Gemini
    #[arg(long, env = "AI_API_URL")]
    api_url: Option<String>,
    #[arg(long, env = "AI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "AI_MODEL", default_value = DEFAULT_CHAT_MODEL)]
    model: String,
    /// Also print the retrieved provisions
    #[arg(long)]
    show_provisions: bool,
}

#[derive(Args, Debug)]
struct ProvisionsArgs {
    /// Only list this category (e.g. `property_law`)
    #[arg(long)]
    category: Option<String>,
    /// Print JSON instead of one line per provision
    #[arg(long)]
    json: bool,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only command output.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => handle_init(&cli.store).await,
        Commands::Search(args) => handle_search(&cli.store, args).await,
        Commands::Analyze(args) => handle_analyze(&cli.store, args).await,
        Commands::Provisions(args) => handle_provisions(&cli.store, args).await,
    }
}

// --- Setup Helpers ---

async fn create_embedder(args: &StoreArgs) -> Result<Box<dyn Embedder>> {
    match (&args.embeddings_api_url, &args.embeddings_model) {
        (Some(api_url), Some(model)) => Ok(Box::new(ApiEmbedder::new(
            api_url.clone(),
            model.clone(),
            std::env::var("EMBEDDINGS_API_KEY").ok(),
        )?)),
        (Some(_), None) => bail!("--embeddings-model is required with --embeddings-api-url"),
        _ => match args.embedder {
            LocalEmbedder::Fastembed => {
                let cache_dir = args.model_cache_dir.clone().map(Into::into);
                Ok(Box::new(FastEmbedder::new(cache_dir).await?))
            }
            LocalEmbedder::Hash => Ok(Box::new(HashEmbedder::new(args.embedding_dimensions))),
        },
    }
}

async fn open_store(args: &StoreArgs) -> Result<SqliteKnowledgeStore> {
    let store = SqliteKnowledgeStore::new(&args.db_url, create_embedder(args).await?).await?;
    Ok(store)
}

fn create_ai_provider(args: &AnalyzeArgs) -> Result<Box<dyn AiProvider>> {
    let provider: Box<dyn AiProvider> = match args.provider {
        LlmProvider::Gemini => {
            let Some(api_key) = args.api_key.clone() else {
                bail!("AI_API_KEY is required for the gemini provider");
            };
            let api_url = args
                .api_url
                .clone()
                .unwrap_or_else(|| GeminiProvider::url_for_model(&args.model));
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        LlmProvider::Local => Box::new(LocalAiProvider::new(
            args.api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_COMPLETIONS_URL.to_string()),
            args.api_key.clone(),
            Some(args.model.clone()),
        )?),
    };
    Ok(provider)
}

// --- Command Handlers ---

async fn handle_init(store_args: &StoreArgs) -> Result<()> {
    let store = open_store(store_args).await?;
    match legalrag::knowledge::ensure_knowledge_base(&store).await? {
        KnowledgeBaseStatus::Initialized { inserted } => {
            println!("Initialized knowledge base with {inserted} provisions.");
        }
        KnowledgeBaseStatus::Existing { count } => {
            println!("Knowledge base already holds {count} provisions.");
        }
    }
    Ok(())
}

async fn handle_search(store_args: &StoreArgs, args: &SearchArgs) -> Result<()> {
    let store = open_store(store_args).await?;
    let context = legalrag::retriever::retrieve_provisions(&store, &args.text, args.limit).await?;
    for (rank, provision) in context.provisions.iter().enumerate() {
        println!(
            "{:>2}. [{:.4}] {} ({})",
            rank + 1,
            provision.distance,
            provision.provision,
            provision.category
        );
    }
    Ok(())
}

async fn build_advisor(store_args: &StoreArgs, args: &AnalyzeArgs) -> Result<LegalAdvisor> {
    let store = open_store(store_args).await?;
    let advisor = LegalAdvisorBuilder::new()
        .ai_provider(create_ai_provider(args)?)
        .knowledge_store(Box::new(store))
        .history_dir(&args.history_dir)
        .top_k(args.top_k)
        .build()?;
    advisor.ensure_knowledge_base().await?;
    Ok(advisor)
}

async fn handle_analyze(store_args: &StoreArgs, args: &AnalyzeArgs) -> Result<()> {
    if args.text.trim().is_empty() {
        bail!("Please enter a case description.");
    }
    let advisor = build_advisor(store_args, args).await?;
    let mut session = CaseSession::new();
    let submission = match advisor.submit_case(&mut session, &args.text).await {
        Ok(submission) => submission,
        Err(e) => bail!(
            "Error analyzing case: {e}\n{}",
            legalrag::constants::RETRY_HINT
        ),
    };
    info!(file = %submission.history_file.display(), "Analysis saved.");

    if args.show_provisions {
        println!("Relevant provisions:");
        for provision in &submission.provisions {
            println!("  - {}", provision.provision);
        }
        println!();
    }
    println!("{}", submission.entry.analysis);
    eprintln!("Saved to {}", submission.history_file.display());
    Ok(())
}

async fn handle_provisions(store_args: &StoreArgs, args: &ProvisionsArgs) -> Result<()> {
    let category = args
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;
    let store = open_store(store_args).await?;
    let provisions = store.list(category).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&provisions)?);
        return Ok(());
    }
    for stored in &provisions {
        println!(
            "{:<24} {}",
            stored.provision.category.as_str(),
            stored.provision.provision
        );
    }
    Ok(())
}
