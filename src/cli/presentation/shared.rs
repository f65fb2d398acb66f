//! Shared presentation helpers: headings and color parsing.

use owo_colors::OwoColorize;

/// Format a section heading, bold and underlined when `styled`.
pub fn format_section_heading(title: &str, styled: bool) -> String {
    if styled {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Parse `#rrggbb` or `#rgb` into RGB components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
            Some((channel(0).ok()?, channel(1).ok()?, channel(2).ok()?))
        }
        _ => None,
    }
}
