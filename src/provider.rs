//! Model Provider Abstraction
//!
//! The two external collaborators of the generation pipeline: a text provider that
//! turns a business description into a structured [`WebsiteDraft`], and an image
//! provider that turns a visual prompt into a displayable [`HeroImage`]. Concrete
//! clients speak the Gemini and OpenAI-compatible REST APIs; the orchestrator only
//! sees the traits, so tests inject mocks.

use crate::asset::HeroImage;
use crate::draft::{GenerationRequest, WebsiteDraft};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub mod gemini;
pub mod openai;
pub mod profile;

pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use profile::{ProviderConfig, ProviderType};

/// Stage one: business description to structured draft.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    async fn generate_draft(&self, request: &GenerationRequest) -> Result<WebsiteDraft, ApiError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

/// Stage two: visual prompt to hero image.
#[async_trait]
pub trait ImageGenerationProvider: Send + Sync {
    async fn generate_image(&self, visual_prompt: &str) -> Result<HeroImage, ApiError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

// Helper function to map transport errors to ApiError
pub(crate) fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        return status_error(status, &error.to_string());
    }
    if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Map a non-success status and its body to an ApiError.
///
/// Providers wrap their reason in `{"error": {"message": ...}}`; when present that
/// message is surfaced instead of the raw body.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    match status.as_u16() {
        401 | 403 => ApiError::ProviderAuthFailed(message),
        429 => ApiError::ProviderRateLimit(message),
        404 => ApiError::ProviderModelNotFound(message),
        _ if message.is_empty() => {
            ApiError::ProviderRequestFailed(format!("Request failed with status {}", status))
        }
        _ => ApiError::ProviderRequestFailed(message),
    }
}

/// Send a prepared request and decode a JSON body, mapping failures to ApiError.
pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ApiError> {
    let response = request.send().await.map_err(map_http_error)?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(status_error(status, &error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))
}

pub(crate) fn build_provider_http_client(config: &ProviderConfig) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// Text and image clients built from one provider configuration.
#[derive(Clone)]
pub struct ProviderClients {
    pub text: Arc<dyn TextGenerationProvider>,
    pub image: Arc<dyn ImageGenerationProvider>,
}

/// Provider factory for creating provider clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(config: &ProviderConfig) -> Result<ProviderClients, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let api_key = config.resolved_api_key().ok_or_else(|| {
            ApiError::ProviderNotConfigured(format!(
                "No API key for {} provider. Set provider.api_key or one of: {}",
                config.provider_type.as_str(),
                config.provider_type.api_key_env_vars().join(", ")
            ))
        })?;

        match config.provider_type {
            ProviderType::Gemini => {
                let client = Arc::new(GeminiClient::from_config(config, api_key)?);
                Ok(ProviderClients {
                    text: client.clone(),
                    image: client,
                })
            }
            ProviderType::OpenAI => {
                let client = Arc::new(OpenAIClient::from_config(config, api_key)?);
                Ok(ProviderClients {
                    text: client.clone(),
                    image: client,
                })
            }
        }
    }
}
