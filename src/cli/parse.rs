//! CLI parse: clap types for sitedraft. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Starting points shown in `generate --help`.
pub const SAMPLE_PROMPTS: [&str; 3] = [
    "Cybersecurity platform",
    "Pet grooming service",
    "Portfolio for a 3D artist",
];

const GENERATE_AFTER_HELP: &str = "Examples:
  sitedraft generate Cybersecurity platform
  sitedraft generate Pet grooming service
  sitedraft generate Portfolio for a 3D artist";

/// Sitedraft CLI - website drafts from a one-line business description
#[derive(Parser)]
#[command(name = "sitedraft")]
#[command(about = "Generate a website draft and hero image from a business description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory (where sitedraft.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a website draft and hero image
    #[command(after_help = GENERATE_AFTER_HELP)]
    Generate {
        /// Business description, e.g. "artisanal coffee roastery in Portland"
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Write the result to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Configuration commands (show, init)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved configuration (api key redacted)
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a starter sitedraft.toml into the workspace
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Prompt words joined with single spaces.
    pub fn joined_prompt(words: &[String]) -> String {
        words.join(" ")
    }
}
