mod app_config;

pub use app_config::{
    AppConfig, EmbeddingConfig, GenerationConfig, HttpConfig, IndexConfig, LogFormat,
    LoggingConfig, PipelineConfig, ServerConfig, StartupConfig,
};
