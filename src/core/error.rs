use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM client not configured: {0}")]
    LlmUnconfigured(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("No task found matching '{0}'")]
    TargetNotFound(String),

    #[error("Missing target: {0}")]
    MissingTarget(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
