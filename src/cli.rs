//! CLI domain: parse, route, help, output, and presentation only.
//! No generation logic; the route table dispatches to the orchestrator and config loader.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, config_command_name};
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands, SAMPLE_PROMPTS};
pub use presentation::{
    format_asset_json, format_asset_text, format_config_init_summary, format_config_json,
    format_config_text, format_progress_line, format_section_heading, parse_hex_color,
};
pub use route::RunContext;
