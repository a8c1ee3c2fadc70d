//! Error types for roam.

use thiserror::Error;

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    Tool,
    Model,
    Parse,
    Unknown,
}

/// The final assistant answer could not be turned into recommendations.
///
/// Carries the raw model text so the boundary can log or echo it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{cause}")]
pub struct ParseError {
    pub raw: String,
    pub cause: String,
}

impl ParseError {
    pub fn new(raw: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            cause: cause.into(),
        }
    }
}

/// Primary error type for all roam operations.
#[derive(Error, Debug)]
pub enum RoamError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid arguments for tool {tool_name}: {message}")]
    ToolArgument { tool_name: String, message: String },

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Agent loop exceeded max iterations ({max_iterations})")]
    MaxIterationsExceeded { max_iterations: usize },

    #[error("Failed to parse recommendations: {0}")]
    ResultParse(#[from] ParseError),
}

impl RoamError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ToolNotFound(_) | Self::ToolArgument { .. } | Self::ToolExecution { .. } => {
                ErrorCategory::Tool
            }
            Self::ModelInvocation(_) | Self::MaxIterationsExceeded { .. } => ErrorCategory::Model,
            Self::ResultParse(_) => ErrorCategory::Parse,
            Self::InvalidArgument(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this error is potentially retryable by a surrounding layer.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Whether the error belongs inside the conversation rather than ending the request.
    pub fn is_model_visible(&self) -> bool {
        self.category() == ErrorCategory::Tool
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RoamError>;
