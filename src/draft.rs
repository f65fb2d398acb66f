//! Website Draft Model
//!
//! Structured content returned by the text stage: copy, feature sections, color
//! palette and the visual prompt handed to the image stage. Wire names follow the
//! provider's camelCase JSON contract; every field is required.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

pub mod prompt;

/// A validated, non-empty business description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
}

impl GenerationRequest {
    /// Trim the prompt and reject it if nothing is left.
    pub fn new(prompt: impl AsRef<str>) -> Result<Self, ApiError> {
        let trimmed = prompt.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApiError::EmptyPrompt);
        }
        Ok(Self {
            prompt: trimmed.to_string(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// One feature block of the generated site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Brand colors. Values are passed through as returned (normally hex strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

/// Complete textual draft of a website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDraft {
    pub business_name: String,
    pub tagline: String,
    pub hero_text: String,
    pub about_us: String,
    pub sections: Vec<Section>,
    pub color_palette: ColorPalette,
    pub image_prompt: String,
}

impl WebsiteDraft {
    /// Parse raw provider output into a draft.
    ///
    /// Accepts a bare JSON object, optionally wrapped in a markdown code fence.
    /// Missing fields or wrong types are reported as [`ApiError::InvalidDraft`].
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let body = strip_code_fence(raw.trim());
        if body.is_empty() {
            return Err(ApiError::InvalidDraft(
                "provider returned an empty response".to_string(),
            ));
        }
        serde_json::from_str(body).map_err(|e| ApiError::InvalidDraft(e.to_string()))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") up to the first newline.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
