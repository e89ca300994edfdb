use thiserror::Error;

/// A central error enum for everything that can go wrong reading or writing
/// the servers config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document parsed as JSON but does not have the expected shape.
    /// Displays as the bare reason so callers can match on it.
    #[error("{0}")]
    InvalidConfig(String),
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON")]
    Parse(#[source] serde_json::Error),
    #[error("could not serialize config")]
    Serialize(#[source] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::InvalidConfig(reason.into())
    }

    /// Returns the validation reason if this is an `InvalidConfig` error.
    pub fn invalid_reason(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidConfig(reason) => Some(reason),
            _ => None,
        }
    }
}
