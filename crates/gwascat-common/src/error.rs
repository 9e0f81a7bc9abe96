use thiserror::Error;

#[derive(Debug, Error)]
pub enum GwasError {
    /// Connection failure, timeout or non-2xx status. Never retried here.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body is not JSON, lacks `response.docs`, or a record is missing a
    /// field every association must carry.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for GwasError {
    fn from(e: reqwest::Error) -> Self {
        GwasError::Transport(e.to_string())
    }
}

impl GwasError {
    pub fn is_transport(&self) -> bool {
        matches!(self, GwasError::Transport(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, GwasError::MalformedResponse(_))
    }
}

pub type Result<T> = std::result::Result<T, GwasError>;
