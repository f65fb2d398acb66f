//! OpenAI-compatible client: chat completions in JSON mode for drafts,
//! `/images/generations` for hero images.

use crate::asset::HeroImage;
use crate::draft::prompt::{draft_instruction, draft_shape_instruction, hero_image_instruction};
use crate::draft::{GenerationRequest, WebsiteDraft};
use crate::error::ApiError;
use crate::provider::gemini::is_image_payload;
use crate::provider::{
    build_provider_http_client, send_json, ImageGenerationProvider, ProviderConfig,
    TextGenerationProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Closest landscape size to 16:9 that the image model family accepts.
fn hero_image_size(image_model: &str) -> &'static str {
    if image_model.starts_with("gpt-image") {
        "1536x1024"
    } else if image_model.starts_with("dall-e-2") {
        // Square sizes only.
        "1024x1024"
    } else {
        "1792x1024"
    }
}

// OpenAI-compatible API request/response structures
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    response_format: ResponseFormat,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: OpenAIMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u8,
    size: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'static str>,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// OpenAI provider client
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl OpenAIClient {
    pub fn from_config(config: &ProviderConfig, api_key: String) -> Result<Self, ApiError> {
        let client = build_provider_http_client(config)?;
        Ok(Self {
            client,
            api_key,
            base_url: config.resolved_endpoint(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
    }
}

#[async_trait]
impl TextGenerationProvider for OpenAIClient {
    async fn generate_draft(&self, request: &GenerationRequest) -> Result<WebsiteDraft, ApiError> {
        let body = ChatCompletionRequest {
            model: self.text_model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: Some(draft_shape_instruction()),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: Some(draft_instruction(request.prompt())),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            stream: false,
        };

        let completion: ChatCompletionResponse =
            send_json(self.post("/chat/completions").json(&body)).await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ProviderError("No choices in response".to_string()))?;

        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ApiError::ProviderError(format!(
                "Empty completion (finish reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        WebsiteDraft::parse(&content)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}

#[async_trait]
impl ImageGenerationProvider for OpenAIClient {
    async fn generate_image(&self, visual_prompt: &str) -> Result<HeroImage, ApiError> {
        // Only the dall-e family accepts response_format; newer models always return base64.
        let response_format = self.image_model.starts_with("dall-e").then_some("b64_json");
        let body = ImageGenerationRequest {
            model: self.image_model.clone(),
            prompt: hero_image_instruction(visual_prompt),
            n: 1,
            size: hero_image_size(&self.image_model),
            response_format,
        };

        let response: ImageGenerationResponse =
            send_json(self.post("/images/generations").json(&body)).await?;

        for datum in response.data {
            if let Some(data) = datum.b64_json.filter(|d| is_image_payload(d)) {
                return Ok(HeroImage::from_base64_png(&data));
            }
            if let Some(url) = datum.url.filter(|u| !u.is_empty()) {
                return Ok(HeroImage::Url(url));
            }
        }

        Err(ApiError::ImageMissing(
            "Failed to generate image".to_string(),
        ))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.image_model
    }
}
