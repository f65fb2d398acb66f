//! Configuration System
//!
//! Layered configuration built with the `config` crate. Lowest to highest precedence:
//! built-in defaults, the global file (`~/.config/sitedraft/config.toml`), the
//! workspace file (`<workspace>/sitedraft.toml`), and `SITEDRAFT__SECTION__KEY`
//! environment variables. An explicit `--config` file replaces both files.

use crate::error::ApiError;
use crate::logging::{validate_format, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::provider::{ProviderConfig, ProviderType};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDraftConfig {
    /// Provider used for both generation stages
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SiteDraftConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(format!("provider: {}", e));
        }
        if let Err(e) = validate_format(&self.logging.format) {
            errors.push(format!("logging: {}", e));
        }
        if let Err(e) = crate::logging::parse_output_destinations(&self.logging.output) {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy safe to print.
    pub fn redacted(&self) -> Self {
        Self {
            provider: self.provider.redacted(),
            logging: self.logging.clone(),
        }
    }

    fn normalized(mut self) -> Self {
        self.provider = self.provider.with_model_defaults();
        self
    }
}

/// Loads [`SiteDraftConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace file, env.
    pub fn load(workspace_root: &Path) -> Result<SiteDraftConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::environment::add_to_builder(builder);

        let config: SiteDraftConfig = builder.build()?.try_deserialize()?;
        Ok(config.normalized())
    }

    /// Load configuration from a single file, still honoring env overrides.
    pub fn load_from_file(path: &Path) -> Result<SiteDraftConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?.add_source(
            config::File::from(path.to_path_buf()).format(config::FileFormat::Toml),
        );
        let builder = sources::environment::add_to_builder(builder);

        let config: SiteDraftConfig = builder.build()?.try_deserialize()?;
        Ok(config.normalized())
    }

    /// Path of the global config file, when a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_config_path()
    }

    /// Write a starter workspace config. Refuses to overwrite unless `force`.
    pub fn write_workspace_template(
        workspace_root: &Path,
        force: bool,
    ) -> Result<PathBuf, ApiError> {
        let path = workspace_config_path(workspace_root);
        if path.exists() && !force {
            return Err(ApiError::ConfigError(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        // Models stay unset so they follow whichever provider_type the user picks.
        let mut template = SiteDraftConfig::default();
        template.provider.text_model.clear();
        template.provider.image_model.clear();
        let body = toml::to_string_pretty(&template)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        std::fs::create_dir_all(workspace_root)?;
        std::fs::write(&path, body)?;
        Ok(path)
    }
}
