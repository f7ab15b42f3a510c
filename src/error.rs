use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("history capacity must be at least 2, got {0}")]
    InvalidHistoryCapacity(usize),
    #[error("max distance must be finite and non-negative, got {0}")]
    InvalidMaxDistance(f64),
    #[error("frame stride must be at least 1")]
    InvalidFrameStride,
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
