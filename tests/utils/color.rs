use chatdeck::utils::color::{parse_color, parse_color_or};
use ratatui::style::Color;

#[test]
fn test_parse_named_colors() {
    assert_eq!(parse_color("red"), Ok(Color::Red));
    assert_eq!(parse_color("  Blue "), Ok(Color::Blue));
    assert_eq!(parse_color("grey"), Ok(Color::Gray));
    assert_eq!(parse_color("default"), Ok(Color::Reset));
}

#[test]
fn test_parse_hex_and_indexed_colors() {
    assert_eq!(parse_color("#1e1e2e"), Ok(Color::Rgb(0x1e, 0x1e, 0x2e)));
    assert_eq!(parse_color("208"), Ok(Color::Indexed(208)));
}

#[test]
fn test_invalid_colors() {
    assert!(parse_color("").is_err());
    assert!(parse_color("#zzzzzz").is_err());
    assert_eq!(parse_color_or("chartreuse-ish", Color::White), Color::White);
}
