use std::str::FromStr;

use ratatui::style::Color;

/// Convert a theme color value to a terminal color.
///
/// Accepts `#rrggbb` hex strings, ANSI color names (`"red"`, `"lightblue"`,
/// `"bright-white"`, ...), indexed colors (`"208"`) and a few names ratatui
/// does not know.
pub fn parse_color(value: &str) -> Result<Color, String> {
    let normalized = value.trim().to_lowercase();
    match normalized.as_str() {
        "" => Err("empty color value".to_string()),
        "default" | "reset" => Ok(Color::Reset),
        "grey" => Ok(Color::Gray),
        "darkgrey" | "dark-grey" | "dark grey" => Ok(Color::DarkGray),
        "purple" => Ok(Color::Magenta),
        "orange" => Ok(Color::Rgb(199, 113, 0)),
        other => Color::from_str(other).map_err(|_| format!("invalid color '{value}'")),
    }
}

/// Like [`parse_color`], falling back to `fallback` for unknown values.
#[must_use]
pub fn parse_color_or(value: &str, fallback: Color) -> Color {
    parse_color(value).unwrap_or(fallback)
}
