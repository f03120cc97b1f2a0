//! # docrag
//!
//! Knowledge-base search engine with retrieval-augmented answers.
//!
//! docrag indexes uploaded documents into searchable fragments and answers
//! natural-language questions by retrieving the most relevant fragments and
//! composing a grounded answer from them.
//!
//! ## Commands
//!
//! - `docrag serve` - Run the HTTP API
//! - `docrag config show|init|path` - Manage configuration
//!
//! ## Examples
//!
//! ```bash
//! # Run the API on the default port
//! docrag serve
//!
//! # Bind elsewhere
//! docrag serve --host 0.0.0.0 --port 9000
//!
//! # Print a sample configuration file
//! docrag config init > config.toml
//! ```
//!
//! With `GROQ_API_KEY` or `OPENAI_API_KEY` set, answers are generated by the
//! chat-completions backend; without either, answers are extractive.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docrag_answer::{AnswerComposer, ComposerConfig, HttpBackend, NullBackend};
use docrag_chunker::WordChunker;
use docrag_core::{AnswerBackend, Embedder, VectorStore};
use docrag_embed::{EmbedderPool, HashEmbedder};
use docrag_engine::{Engine, EngineConfig};
use docrag_extract::ExtractorRegistry;
use docrag_store::MemoryStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod http;

use config::{data_dir, Config};
use http::AppState;

#[derive(Parser)]
#[command(name = "docrag")]
#[command(about = "Knowledge-base search with retrieval-augmented answers")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/docrag/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config_path = cli.config.clone().or_else(Config::config_path);
    let config = Config::load_from(config_path).map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Serve { host, port } => serve(config, host, port).await,

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    println!(
                        "{}",
                        toml::to_string_pretty(&config).context("Failed to serialize config")?
                    );
                }
                ConfigAction::Init => {
                    println!("{}", Config::sample_toml());
                }
                ConfigAction::Path => {
                    if let Some(path) = Config::config_path() {
                        println!("{}", path.display());
                    } else {
                        println!("Could not determine config directory");
                    }
                }
            }
            Ok(())
        }
    }
}

/// Wire the component stack and run the HTTP server.
async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let upload_dir = config
        .upload
        .dir
        .clone()
        .or_else(|| data_dir().map(|d| d.join("uploads")))
        .context("Failed to determine upload directory")?;
    std::fs::create_dir_all(&upload_dir).context("Failed to create upload directory")?;

    let store: Arc<dyn VectorStore> = Arc::new(MemoryStore::new(config.embedding.dimension));

    let embedder: Arc<dyn Embedder> = Arc::new(EmbedderPool::new(
        Arc::new(HashEmbedder::with_dimension(config.embedding.dimension)),
        config.embedding.max_concurrent,
    ));

    let backend: Arc<dyn AnswerBackend> = match HttpBackend::from_env() {
        Ok(backend) => {
            info!("Generation backend configured");
            let backend = match config.answer.model.clone() {
                Some(model) => backend.with_model(model),
                None => backend,
            };
            Arc::new(
                backend.with_timeout(Duration::from_secs(config.answer.generation_timeout_secs)),
            )
        }
        Err(e) => {
            info!("{e}; answers will be extractive");
            Arc::new(NullBackend)
        }
    };

    let composer = AnswerComposer::new(
        backend,
        ComposerConfig {
            context_fragments: config.answer.context_fragments,
            preview_chars: config.answer.preview_chars,
            generation_timeout: Duration::from_secs(config.answer.generation_timeout_secs),
        },
    );

    let chunker = WordChunker::with_sizes(config.chunking.chunk_size, config.chunking.overlap)
        .map_err(|e| anyhow::anyhow!("invalid chunking config: {e}"))?;

    let engine = Engine::new(
        store,
        embedder,
        chunker,
        composer,
        EngineConfig {
            default_top_k: config.query.default_top_k,
            max_top_k: config.query.max_top_k,
        },
    );

    let state = Arc::new(AppState {
        engine,
        extractors: ExtractorRegistry::with_defaults(),
        upload_dir,
        max_file_bytes: config.upload.max_file_bytes,
    });

    let app = http::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("docrag listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
