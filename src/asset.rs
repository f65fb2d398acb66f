//! Generated Asset State
//!
//! Lifecycle of one generation as a tagged state machine:
//!
//! ```text
//! Idle | Success | Failed --generate--> LoadingText --draft--> LoadingImage --image|fallback--> Success
//!                                        LoadingText --text error--> Failed
//! ```
//!
//! An image alongside an error, or an error while loading, cannot be expressed.

use crate::draft::WebsiteDraft;
use serde::{Deserialize, Serialize};

/// Placeholder shown when the image stage fails. Constant across all failures.
pub const FALLBACK_HERO_IMAGE_URL: &str = "https://picsum.photos/1200/800";

/// Displayable hero image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum HeroImage {
    /// Inline bytes as a `data:` URI.
    DataUri(String),
    /// Direct link returned by the provider.
    Url(String),
    /// Image stage failed; resolves to [`FALLBACK_HERO_IMAGE_URL`].
    Placeholder,
}

impl HeroImage {
    /// Build a `data:` URI from base64 image bytes.
    pub fn from_base64_png(data: &str) -> Self {
        HeroImage::DataUri(format!("data:image/png;base64,{}", data))
    }

    /// Reference usable as an `src` attribute.
    pub fn src(&self) -> &str {
        match self {
            HeroImage::DataUri(uri) => uri,
            HeroImage::Url(url) => url,
            HeroImage::Placeholder => FALLBACK_HERO_IMAGE_URL,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, HeroImage::Placeholder)
    }
}

/// Coarse phase name, used for logging and progress output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    LoadingText,
    LoadingImage,
    Success,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::LoadingText => "loading_text",
            Phase::LoadingImage => "loading_image",
            Phase::Success => "success",
            Phase::Failed => "failed",
        }
    }
}

/// State of the current (or last) generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GeneratedAsset {
    #[default]
    Idle,
    LoadingText,
    LoadingImage {
        draft: WebsiteDraft,
    },
    Success {
        draft: WebsiteDraft,
        hero_image: HeroImage,
    },
    Failed {
        error: String,
    },
}

impl GeneratedAsset {
    pub fn phase(&self) -> Phase {
        match self {
            GeneratedAsset::Idle => Phase::Idle,
            GeneratedAsset::LoadingText => Phase::LoadingText,
            GeneratedAsset::LoadingImage { .. } => Phase::LoadingImage,
            GeneratedAsset::Success { .. } => Phase::Success,
            GeneratedAsset::Failed { .. } => Phase::Failed,
        }
    }

    pub fn draft(&self) -> Option<&WebsiteDraft> {
        match self {
            GeneratedAsset::LoadingImage { draft } | GeneratedAsset::Success { draft, .. } => {
                Some(draft)
            }
            _ => None,
        }
    }

    pub fn hero_image(&self) -> Option<&HeroImage> {
        match self {
            GeneratedAsset::Success { hero_image, .. } => Some(hero_image),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            GeneratedAsset::LoadingText | GeneratedAsset::LoadingImage { .. }
        )
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GeneratedAsset::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Terminal states are only left through a new generation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GeneratedAsset::Success { .. } | GeneratedAsset::Failed { .. }
        )
    }
}
