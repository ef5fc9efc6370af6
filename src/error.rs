use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A raw catalogue entry lacked a field the normalizer needs.
    #[error("Malformed {source_name} record: {message}")]
    MissingField {
        source_name: &'static str,
        message: String,
    },

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Failed to publish {artifact}: {message}")]
    Publish { artifact: String, message: String },

    #[error("Environment variable {name}: {source}")]
    Env {
        name: &'static str,
        source: std::env::VarError,
    },
}

impl CatalogueError {
    pub fn missing_field(source_name: &'static str, err: impl std::fmt::Display) -> Self {
        Self::MissingField {
            source_name,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
