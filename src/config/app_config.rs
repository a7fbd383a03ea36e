use serde::Deserialize;

use crate::domain::EmptyQueryPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub startup: StartupConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Embedding service settings
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model identifier on the inference service
    pub model: String,
    /// Vector dimensionality; must match the vectors stored in the index
    pub dimensions: usize,
    /// Override for the inference API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Vector index settings
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Name of the pre-existing index
    pub name: String,
    /// Data-plane host URL of the index; required to serve or ingest
    #[serde(default)]
    pub host: Option<String>,
}

/// Generation service settings
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Generation model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum output length in tokens
    pub max_tokens: u32,
    /// Override for the generation API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Answer pipeline settings
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of chunks retrieved per query
    pub top_k: u32,
    /// Empty query handling
    #[serde(default)]
    pub empty_query: EmptyQueryPolicy,
    /// Override for the system instruction template; must reference
    /// `${var:context}`
    #[serde(default)]
    pub system_template: Option<String>,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout for calls to external services, in seconds
    pub timeout_secs: u64,
}

/// Startup discipline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartupConfig {
    /// Probe the vector index during boot instead of waiting for the first
    /// query. Off by default: the service starts lazily and the first query
    /// pays any cold-start cost.
    #[serde(default)]
    pub probe: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            base_url: None,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: "medicalbot".to_string(),
            host: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.4,
            max_tokens: 500,
            base_url: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            empty_query: EmptyQueryPolicy::default(),
            system_template: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
