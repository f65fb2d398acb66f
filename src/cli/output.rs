//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
/// Missing credentials get a hint on where to put them.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ProviderNotConfigured(_) => format!(
            "{}\nSet [provider] api_key in sitedraft.toml or export the provider's API key variable.",
            e
        ),
        other => other.to_string(),
    }
}
