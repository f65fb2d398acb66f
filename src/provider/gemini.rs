//! Gemini client for the Generative Language REST API (`models/{model}:generateContent`).
//!
//! Text drafts use schema-constrained JSON output; hero images use an image model
//! with a 16:9 aspect ratio hint and come back as inline base64 parts.

use crate::asset::HeroImage;
use crate::draft::prompt::{
    draft_instruction, draft_response_schema, hero_image_instruction, HERO_ASPECT_RATIO,
};
use crate::draft::{GenerationRequest, WebsiteDraft};
use crate::error::ApiError;
use crate::provider::{
    build_provider_http_client, send_json, ImageGenerationProvider, ProviderConfig,
    TextGenerationProvider,
};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    thought: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    #[allow(dead_code)]
    #[serde(default)]
    mime_type: Option<String>,
    file_uri: String,
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, or an error naming why there are none.
    fn into_first_parts(self) -> Result<Vec<Part>, ApiError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let candidate = self.candidates.into_iter().next().ok_or_else(|| match block_reason {
            Some(reason) => ApiError::ProviderError(format!("Prompt blocked: {}", reason)),
            None => ApiError::ProviderError("No candidates in response".to_string()),
        })?;
        let finish_reason = candidate.finish_reason;
        match candidate.content {
            Some(content) if !content.parts.is_empty() => Ok(content.parts),
            _ => Err(ApiError::ProviderError(format!(
                "Candidate has no content (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}

/// Gemini provider client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn from_config(config: &ProviderConfig, api_key: String) -> Result<Self, ApiError> {
        let client = build_provider_http_client(config)?;
        Ok(Self {
            client,
            api_key,
            endpoint: config.resolved_endpoint(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);
        debug!(model, "gemini generateContent");
        send_json(
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("Content-Type", "application/json")
                .json(request),
        )
        .await
    }
}

fn user_text(text: String) -> Vec<Content> {
    vec![Content {
        role: Some("user".to_string()),
        parts: vec![Part {
            text: Some(text),
            ..Part::default()
        }],
    }]
}

#[async_trait]
impl TextGenerationProvider for GeminiClient {
    async fn generate_draft(&self, request: &GenerationRequest) -> Result<WebsiteDraft, ApiError> {
        let body = GenerateContentRequest {
            contents: user_text(draft_instruction(request.prompt())),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(draft_response_schema()),
                ..GenerationConfig::default()
            }),
        };

        let parts = self
            .generate_content(&self.text_model, &body)
            .await?
            .into_first_parts()?;
        let text: String = parts
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        WebsiteDraft::parse(&text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}

#[async_trait]
impl ImageGenerationProvider for GeminiClient {
    async fn generate_image(&self, visual_prompt: &str) -> Result<HeroImage, ApiError> {
        let body = GenerateContentRequest {
            contents: user_text(hero_image_instruction(visual_prompt)),
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: HERO_ASPECT_RATIO.to_string(),
                }),
                ..GenerationConfig::default()
            }),
        };

        let parts = self
            .generate_content(&self.image_model, &body)
            .await?
            .into_first_parts()?;

        for part in parts {
            if let Some(inline) = part.inline_data {
                if is_image_payload(&inline.data) {
                    return Ok(HeroImage::from_base64_png(&inline.data));
                }
                debug!(mime_type = %inline.mime_type, "skipping unusable inline part");
            }
            if let Some(file) = part.file_data {
                return Ok(HeroImage::Url(file.file_uri));
            }
        }

        Err(ApiError::ImageMissing(
            "Failed to generate image".to_string(),
        ))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.image_model
    }
}

pub(crate) fn is_image_payload(data: &str) -> bool {
    !data.is_empty()
        && base64::engine::general_purpose::STANDARD
            .decode(data)
            .map(|bytes| !bytes.is_empty())
            .unwrap_or(false)
}
