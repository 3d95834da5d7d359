//! Error types for the graph engine

use thiserror::Error;

/// Main error type for graph building operations
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("graph definition {0} not found in registry")]
    DefinitionNotFound(usize),

    #[error("analysis results not available: {0}")]
    Oracle(#[from] OracleError),

    #[error("result arrays have mismatched lengths ({x} x-values, {y} y-values)")]
    LengthMismatch { x: usize, y: usize },

    #[error("spec check artifact missing at poi {0}")]
    ArtifactMissing(usize),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for graph building operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Failure reported by the structural-analysis oracle
#[derive(Error, Debug)]
#[error("{message}")]
pub struct OracleError {
    /// Description of what the analysis layer could not produce
    pub message: String,
}

impl OracleError {
    /// Create an oracle error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
