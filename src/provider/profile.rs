//! Provider configuration: which API to call, with which models and credentials.

use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const GEMINI_DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const GEMINI_DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

pub const OPENAI_DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";
pub const OPENAI_DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Supported provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenAI => "openai",
        }
    }

    /// Environment variables consulted, in order, when no api_key is configured.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderType::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            ProviderType::OpenAI => &["OPENAI_API_KEY"],
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderType::Gemini => GEMINI_DEFAULT_ENDPOINT,
            ProviderType::OpenAI => OPENAI_DEFAULT_ENDPOINT,
        }
    }
}

/// Provider section of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    /// API key; when absent the provider's environment variables are consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL; defaults per provider type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Empty means the provider type's default; see [`ProviderConfig::with_model_defaults`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text_model: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_model: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_provider_type() -> ProviderType {
    ProviderType::Gemini
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::for_type(ProviderType::Gemini)
    }
}

impl ProviderConfig {
    /// Defaults for a provider type, including its default models.
    pub fn for_type(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            api_key: None,
            endpoint: None,
            text_model: String::new(),
            image_model: String::new(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
        .with_model_defaults()
    }

    /// Fill unset models with the provider type's defaults.
    pub fn with_model_defaults(mut self) -> Self {
        let (text_model, image_model) = match self.provider_type {
            ProviderType::Gemini => (GEMINI_DEFAULT_TEXT_MODEL, GEMINI_DEFAULT_IMAGE_MODEL),
            ProviderType::OpenAI => (OPENAI_DEFAULT_TEXT_MODEL, OPENAI_DEFAULT_IMAGE_MODEL),
        };
        if self.text_model.trim().is_empty() {
            self.text_model = text_model.to_string();
        }
        if self.image_model.trim().is_empty() {
            self.image_model = image_model.to_string();
        }
        self
    }

    /// Endpoint with any trailing slash removed.
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider_type.default_endpoint())
            .trim_end_matches('/')
            .to_string()
    }

    /// Configured key, else the first non-empty provider environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.trim().to_string());
        }
        self.provider_type
            .api_key_env_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    /// Copy safe to print: the api key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(key) = copy.api_key.as_mut() {
            *key = mask_key(key);
        }
        copy
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.text_model.trim().is_empty() {
            return Err("Text model cannot be empty".to_string());
        }
        if self.image_model.trim().is_empty() {
            return Err("Image model cannot be empty".to_string());
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }
        let endpoint = self.resolved_endpoint();
        let url = Url::parse(&endpoint)
            .map_err(|e| format!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "Endpoint URL '{}' must use http or https",
                endpoint
            ));
        }
        Ok(())
    }
}

fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 8 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
