//! Inline markup for content lines.
//!
//! Supports `{bold}...{/bold}` and `{pin}...{/pin}` (pinned-word highlight). Any
//! other `{...}` sequence is kept as literal text.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const BOLD_OPEN: &str = "{bold}";
const BOLD_CLOSE: &str = "{/bold}";
const PIN_OPEN: &str = "{pin}";
const PIN_CLOSE: &str = "{/pin}";

/// Wrap `word` in highlight tags.
#[must_use]
pub fn pin(word: &str) -> String {
    format!("{PIN_OPEN}{word}{PIN_CLOSE}")
}

#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    bold: bool,
    pinned: bool,
}

impl Marks {
    fn style(self, base: Style) -> Style {
        let mut style = base;
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.pinned {
            style = style.fg(Color::White).bg(Color::Cyan);
        }
        style
    }
}

/// Parse a single line of markup into styled spans on top of `base`.
#[must_use]
pub fn parse_line(input: &str, base: Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut marks = Marks::default();
    let mut text = String::new();
    let mut rest = input;

    while let Some(index) = rest.find('{') {
        text.push_str(&rest[..index]);
        rest = &rest[index..];

        let toggled = [
            (BOLD_OPEN, Some(true), None),
            (BOLD_CLOSE, Some(false), None),
            (PIN_OPEN, None, Some(true)),
            (PIN_CLOSE, None, Some(false)),
        ]
        .into_iter()
        .find(|(tag, _, _)| rest.starts_with(tag));

        match toggled {
            Some((tag, bold, pinned)) => {
                push_span(&mut spans, &mut text, marks.style(base));
                marks.bold = bold.unwrap_or(marks.bold);
                marks.pinned = pinned.unwrap_or(marks.pinned);
                rest = &rest[tag.len()..];
            }
            None => {
                text.push('{');
                rest = &rest[1..];
            }
        }
    }
    text.push_str(rest);
    push_span(&mut spans, &mut text, marks.style(base));

    Line::from(spans)
}

/// Remove markup tags, leaving the visible text.
#[must_use]
pub fn strip_tags(input: &str) -> String {
    [BOLD_OPEN, BOLD_CLOSE, PIN_OPEN, PIN_CLOSE]
        .iter()
        .fold(input.to_string(), |text, tag| text.replace(tag, ""))
}

fn push_span(spans: &mut Vec<Span<'static>>, text: &mut String, style: Style) {
    if text.is_empty() {
        return;
    }
    spans.push(Span::styled(std::mem::take(text), style));
}
