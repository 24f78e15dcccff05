use thiserror::Error;

use crate::common::error::HaierError::GenericError;

#[derive(Debug, Error)]
pub enum HaierError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("Scheduler responded with status {status}: {body}")]
    StatusError { status: u16, body: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Core error: {0}")]
    CoreError(#[from] hwres::Error),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<serde_json::error::Error> for HaierError {
    fn from(e: serde_json::error::Error) -> Self {
        Self::DeserializationError(e.to_string())
    }
}

impl From<bincode::Error> for HaierError {
    fn from(e: bincode::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

impl From<reqwest::Error> for HaierError {
    fn from(e: reqwest::Error) -> Self {
        Self::HttpError(e.to_string())
    }
}

impl From<anyhow::Error> for HaierError {
    fn from(error: anyhow::Error) -> Self {
        Self::GenericError(error.to_string())
    }
}

impl From<toml::de::Error> for HaierError {
    fn from(error: toml::de::Error) -> Self {
        Self::DeserializationError(error.to_string())
    }
}

impl From<hwres::AlgebraError> for HaierError {
    fn from(error: hwres::AlgebraError) -> Self {
        Self::CoreError(error.into())
    }
}

impl From<String> for HaierError {
    fn from(e: String) -> Self {
        GenericError(e)
    }
}
