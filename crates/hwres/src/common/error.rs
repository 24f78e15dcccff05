use thiserror::Error;

use crate::resources::AlgebraError;

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum DsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Resource error: {0}")]
    AlgebraError(#[from] AlgebraError),
    #[error("Job graph error: {0}")]
    GraphError(String),
    #[error("Accelerator discovery error: {0}")]
    DiscoveryError(String),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<String> for DsError {
    fn from(e: String) -> Self {
        Self::GenericError(e)
    }
}

impl From<&str> for DsError {
    fn from(e: &str) -> Self {
        Self::GenericError(e.to_string())
    }
}
