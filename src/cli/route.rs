//! CLI route: single route table and run context. Dispatches to the orchestrator,
//! the config loader and presentation.

use crate::asset::{GeneratedAsset, Phase};
use crate::cli::help::command_name;
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_asset_json, format_asset_text, format_config_init_summary, format_config_json,
    format_config_text, format_progress_line,
};
use crate::config::{ConfigLoader, SiteDraftConfig};
use crate::draft::GenerationRequest;
use crate::error::ApiError;
use crate::orchestrator::GenerationOrchestrator;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and resolved configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: SiteDraftConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        debug!(
            workspace = %workspace_root.display(),
            provider = config.provider.provider_type.as_str(),
            "Configuration loaded"
        );
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &SiteDraftConfig {
        &self.config
    }

    /// Execute a command and return the text destined for stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = match command {
            Commands::Generate {
                prompt,
                format,
                output,
            } => self.handle_generate(&Commands::joined_prompt(prompt), format, output.as_deref()),
            Commands::Config { command } => self.handle_config(command),
        };
        info!(
            command = %name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_generate(
        &self,
        prompt: &str,
        format: &str,
        output: Option<&Path>,
    ) -> Result<String, ApiError> {
        validate_output_format(format)?;
        // Reject an empty prompt before any provider is built.
        let request = GenerationRequest::new(prompt)?;

        let orchestrator = GenerationOrchestrator::from_config(&self.config.provider)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let asset = runtime.block_on(run_with_progress(&orchestrator, request.prompt()))?;

        if let GeneratedAsset::Failed { error } = &asset {
            return Err(ApiError::GenerationFailed(error.clone()));
        }

        let rendered = if format == "json" {
            format_asset_json(&asset, chrono::Utc::now())?
        } else {
            format_asset_text(&asset, output.is_none() && use_color())
        };

        match output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                Ok(format!("Wrote draft to {}", path.display()))
            }
            None => Ok(rendered),
        }
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Show { format } => {
                validate_output_format(format)?;
                let redacted = self.config.redacted();
                if format == "json" {
                    format_config_json(&redacted)
                } else {
                    Ok(format_config_text(&redacted, use_color()))
                }
            }
            ConfigCommands::Init { force } => {
                let path = ConfigLoader::write_workspace_template(&self.workspace_root, *force)?;
                Ok(format_config_init_summary(&path))
            }
        }
    }
}

/// Drive one generation, printing a progress line to stderr per observed transition.
async fn run_with_progress(
    orchestrator: &GenerationOrchestrator,
    prompt: &str,
) -> Result<GeneratedAsset, ApiError> {
    let mut updates = orchestrator.subscribe();
    let mut last_reported: Option<Phase> = None;
    let mut report = |asset: &GeneratedAsset| {
        if last_reported == Some(asset.phase()) {
            return;
        }
        last_reported = Some(asset.phase());
        if let Some(line) = format_progress_line(asset) {
            eprintln!("{}", line);
        }
    };

    let generation = orchestrator.generate(prompt);
    tokio::pin!(generation);
    let result = loop {
        tokio::select! {
            result = &mut generation => break result,
            changed = updates.changed() => {
                if changed.is_err() {
                    break (&mut generation).await;
                }
                let current = updates.borrow_and_update().clone();
                report(&current);
            }
        }
    };

    if let Ok(ref terminal) = result {
        report(terminal);
    }
    result
}

fn validate_output_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
