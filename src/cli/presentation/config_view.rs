//! Config command presentation: resolved config text/json and init summary.

use crate::cli::presentation::shared::format_section_heading;
use crate::config::SiteDraftConfig;
use crate::error::ApiError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::path::Path;

/// Resolved configuration as a key/value table. Pass a redacted config.
pub fn format_config_text(config: &SiteDraftConfig, styled: bool) -> String {
    let provider = &config.provider;
    let logging = &config.logging;

    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Provider", styled)));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Value"]);
    table.add_row(vec!["provider_type", provider.provider_type.as_str()]);
    table.add_row(vec!["endpoint".to_string(), provider.resolved_endpoint()]);
    table.add_row(vec!["text_model", provider.text_model.as_str()]);
    table.add_row(vec!["image_model", provider.image_model.as_str()]);
    table.add_row(vec![
        "api_key",
        provider.api_key.as_deref().unwrap_or("(from environment)"),
    ]);
    table.add_row(vec![
        "connect_timeout_secs".to_string(),
        provider.connect_timeout_secs.to_string(),
    ]);
    table.add_row(vec![
        "request_timeout_secs".to_string(),
        provider.request_timeout_secs.to_string(),
    ]);
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n", format_section_heading("Logging", styled)));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Value"]);
    table.add_row(vec!["enabled".to_string(), logging.enabled.to_string()]);
    table.add_row(vec!["level", logging.level.as_str()]);
    table.add_row(vec!["format", logging.format.as_str()]);
    table.add_row(vec!["output", logging.output.as_str()]);
    if let Some(ref file) = logging.file {
        table.add_row(vec!["file".to_string(), file.display().to_string()]);
    }
    out.push_str(&format!("{}", table));
    out
}

pub fn format_config_json(config: &SiteDraftConfig) -> Result<String, ApiError> {
    serde_json::to_string_pretty(config)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
}

pub fn format_config_init_summary(path: &Path) -> String {
    format!(
        "Wrote {}\nEdit [provider] to choose a provider and models; the API key may stay in the environment.",
        path.display()
    )
}
