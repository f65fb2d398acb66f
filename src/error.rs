//! Error types for the sitedraft generation pipeline.

use thiserror::Error;

/// Message surfaced when a failure carries no usable text of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred during generation.";

/// Errors raised by providers, configuration and the generation boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("A generation is already in progress")]
    GenerationInProgress,

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Invalid website draft: {0}")]
    InvalidDraft(String),

    #[error("No image in provider response: {0}")]
    ImageMissing(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A generation that ended in the failed state, surfaced at the CLI boundary.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Message shown to the user for a failed generation.
    ///
    /// Provider variants surface the provider's own text; a blank message falls
    /// back to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        let inner = match self {
            ApiError::ProviderError(msg)
            | ApiError::ProviderNotConfigured(msg)
            | ApiError::ProviderRequestFailed(msg)
            | ApiError::ProviderAuthFailed(msg)
            | ApiError::ProviderRateLimit(msg)
            | ApiError::ProviderModelNotFound(msg)
            | ApiError::InvalidDraft(msg)
            | ApiError::ImageMissing(msg)
            | ApiError::ConfigError(msg)
            | ApiError::GenerationFailed(msg) => msg.trim().to_string(),
            other => other.to_string(),
        };
        if inner.is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            inner
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
