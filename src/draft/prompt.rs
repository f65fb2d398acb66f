//! Fixed instruction templates wrapped around user input before it reaches a provider.

use serde_json::{json, Value};

/// Style prefix placed in front of the draft's visual prompt.
pub const IMAGE_STYLE_PREFIX: &str =
    "High quality, 4k resolution, modern minimalist photography for a website hero section. Subject: ";

/// Aspect ratio requested for hero images.
pub const HERO_ASPECT_RATIO: &str = "16:9";

/// Instruction sent to the text stage for a business description.
pub fn draft_instruction(business_prompt: &str) -> String {
    format!(
        "Generate a professional website concept for: {}. Focus on modern SaaS/Business aesthetics.",
        business_prompt
    )
}

/// Instruction sent to the image stage for a draft's visual prompt.
pub fn hero_image_instruction(visual_prompt: &str) -> String {
    format!("{}{}", IMAGE_STYLE_PREFIX, visual_prompt)
}

/// Response schema for a [`WebsiteDraft`](crate::draft::WebsiteDraft), in the
/// OpenAPI subset accepted by structured-output endpoints.
pub fn draft_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "businessName": { "type": "STRING" },
            "tagline": { "type": "STRING" },
            "heroText": { "type": "STRING" },
            "aboutUs": { "type": "STRING" },
            "imagePrompt": {
                "type": "STRING",
                "description": "A detailed visual prompt to generate a stunning hero image for this business. Focus on style, mood, and high-end aesthetics."
            },
            "colorPalette": {
                "type": "OBJECT",
                "properties": {
                    "primary": { "type": "STRING", "description": "Hex code for primary brand color" },
                    "secondary": { "type": "STRING", "description": "Hex code for secondary brand color" },
                    "accent": { "type": "STRING", "description": "Hex code for accent color" }
                },
                "required": ["primary", "secondary", "accent"]
            },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "features": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["title", "description", "features"]
                }
            }
        },
        "required": [
            "businessName", "tagline", "heroText", "aboutUs",
            "sections", "colorPalette", "imagePrompt"
        ]
    })
}

/// Plain-language description of the draft shape, for providers without
/// schema-constrained output.
pub fn draft_shape_instruction() -> String {
    format!(
        "Respond with a single JSON object only, no prose. It must match this schema exactly, \
         with every listed field present: {}",
        draft_response_schema()
    )
}
