//! CLI presentation: text and json formatters per command family.

mod config_view;
mod draft;
mod shared;

pub use config_view::{format_config_json, format_config_text, format_config_init_summary};
pub use draft::{format_asset_json, format_asset_text, format_progress_line};
pub use shared::{format_section_heading, parse_hex_color};
