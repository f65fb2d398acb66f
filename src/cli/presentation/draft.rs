//! Generation presentation: progress lines, draft text and json.

use crate::asset::{GeneratedAsset, HeroImage, Phase};
use crate::cli::presentation::shared::{format_section_heading, parse_hex_color};
use crate::draft::{ColorPalette, WebsiteDraft};
use crate::error::ApiError;
use chrono::{DateTime, SecondsFormat, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// One stderr line per state transition; `None` for states with nothing to report.
///
/// A failed generation is reported once, by the command's error exit.
pub fn format_progress_line(asset: &GeneratedAsset) -> Option<String> {
    match asset.phase() {
        Phase::Idle | Phase::Failed => None,
        Phase::LoadingText => Some("Drafting copy...".to_string()),
        Phase::LoadingImage => Some(format!(
            "Rendering hero image for {}...",
            asset.draft().map(|d| d.business_name.as_str()).unwrap_or("draft")
        )),
        Phase::Success => Some(match asset.hero_image() {
            Some(image) if image.is_placeholder() => {
                "Done (hero image unavailable, using placeholder).".to_string()
            }
            _ => "Done.".to_string(),
        }),
    }
}

/// Human-readable rendering of a terminal state.
pub fn format_asset_text(asset: &GeneratedAsset, styled: bool) -> String {
    match asset {
        GeneratedAsset::Success { draft, hero_image } => {
            format_draft_text(draft, hero_image, styled)
        }
        GeneratedAsset::Failed { error } => format!("Generation failed: {}", error),
        other => format!("Generation state: {}", other.phase().as_str()),
    }
}

fn format_draft_text(draft: &WebsiteDraft, hero_image: &HeroImage, styled: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_section_heading(&draft.business_name, styled)
    ));
    out.push_str(&format!("{}\n\n", draft.tagline));

    out.push_str(&format!("{}\n", format_section_heading("Hero", styled)));
    out.push_str(&format!("  {}\n", draft.hero_text));
    out.push_str(&format!("  Image: {}\n\n", describe_hero_image(hero_image)));

    out.push_str(&format!("{}\n", format_section_heading("About us", styled)));
    out.push_str(&format!("  {}\n\n", draft.about_us));

    if !draft.sections.is_empty() {
        out.push_str(&format!("{}\n", format_section_heading("Sections", styled)));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Section", "Description", "Features"]);
        for section in &draft.sections {
            table.add_row(vec![
                section.title.clone(),
                section.description.clone(),
                section.features.join("\n"),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    out.push_str(&format!("{}\n", format_section_heading("Palette", styled)));
    out.push_str(&format_palette(&draft.color_palette, styled));
    out.push_str(&format!("\n{}\n", format_section_heading("Image prompt", styled)));
    out.push_str(&format!("  {}\n", draft.image_prompt));
    out
}

fn describe_hero_image(image: &HeroImage) -> String {
    match image {
        HeroImage::DataUri(uri) => format!("inline PNG ({} bytes encoded)", uri.len()),
        HeroImage::Url(url) => url.clone(),
        HeroImage::Placeholder => format!("{} (placeholder)", image.src()),
    }
}

fn format_palette(palette: &ColorPalette, styled: bool) -> String {
    [
        ("Primary", &palette.primary),
        ("Secondary", &palette.secondary),
        ("Accent", &palette.accent),
    ]
    .iter()
    .map(|(label, value)| {
        let swatch = match parse_hex_color(value) {
            Some((r, g, b)) if styled => format!(" {}", "██".truecolor(r, g, b)),
            _ => String::new(),
        };
        format!("  {:<10} {}{}\n", label, value, swatch)
    })
    .collect()
}

/// JSON rendering of a terminal state. The hero image `src` is always resolved.
pub fn format_asset_json(
    asset: &GeneratedAsset,
    generated_at: DateTime<Utc>,
) -> Result<String, ApiError> {
    let generated_at = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let out = match asset {
        GeneratedAsset::Success { draft, hero_image } => json!({
            "state": asset.phase().as_str(),
            "generatedAt": generated_at,
            "draft": draft,
            "heroImage": {
                "kind": hero_image_kind(hero_image),
                "src": hero_image.src(),
            },
        }),
        GeneratedAsset::Failed { error } => json!({
            "state": asset.phase().as_str(),
            "generatedAt": generated_at,
            "error": error,
        }),
        other => serde_json::to_value(other)
            .map_err(|e| ApiError::ProviderError(format!("Failed to serialize state: {}", e)))?,
    };
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::ProviderError(format!("Failed to serialize state: {}", e)))
}

fn hero_image_kind(image: &HeroImage) -> &'static str {
    match image {
        HeroImage::DataUri(_) => "data_uri",
        HeroImage::Url(_) => "url",
        HeroImage::Placeholder => "placeholder",
    }
}
