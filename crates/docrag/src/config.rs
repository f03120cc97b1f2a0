//! Configuration handling for docrag.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload handling configuration
    #[serde(default)]
    pub upload: UploadConfig,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Answer composition configuration
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upload handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are saved to (default: XDG data dir)
    pub dir: Option<PathBuf>,

    /// Maximum upload size per file (bytes)
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_max_file_bytes() -> u64 {
    16 * 1024 * 1024 // 16MB
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Fragment size in words
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Words shared between consecutive fragments
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

fn default_chunk_size() -> usize {
    500
}

fn default_overlap() -> usize {
    50
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

/// Embedding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding dimension
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Max concurrent embedding calls
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_dimension() -> usize {
    384
}

fn default_max_concurrent() -> usize {
    4
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Answer composition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerConfig {
    /// Generation model override
    pub model: Option<String>,

    /// Fragments used as grounding context
    #[serde(default = "default_context_fragments")]
    pub context_fragments: usize,

    /// Per-fragment preview length (characters)
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Upper bound on one generation attempt (seconds)
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
}

fn default_context_fragments() -> usize {
    3
}

fn default_preview_chars() -> usize {
    400
}

fn default_generation_timeout_secs() -> u64 {
    30
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            model: None,
            context_fragments: default_context_fragments(),
            preview_chars: default_preview_chars(),
            generation_timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Default result limit
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Maximum result limit
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
}

fn default_top_k() -> usize {
    5
}

fn default_max_top_k() -> usize {
    20
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, String> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self, String> {
        match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
                toml::from_str(&raw)
                    .map_err(|e| format!("failed to parse {}: {e}", path.display()))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Default config file path.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("DOCRAG_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.toml"));
        }

        ProjectDirs::from("", "", "docrag").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Print a sample configuration file.
    pub fn sample_toml() -> String {
        let sample = Self::default();
        toml::to_string_pretty(&sample)
            .unwrap_or_else(|_| "# failed to render sample config".to_string())
    }
}

/// Get the data directory for docrag (uploads live here).
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("DOCRAG_DATA_DIR") {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "docrag").map(|dirs| dirs.data_dir().to_path_buf())
}
