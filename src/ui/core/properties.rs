//! Layout and style properties applied to atoms through `update`.

use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use super::error::UiError;

/// A length along one axis, relative to the parent area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Absolute number of cells.
    Fixed(u16),
    /// Percentage of the parent plus a signed cell offset (`"75%+2"`, `"100%-3"`).
    Relative { percent: u16, offset: i32 },
    /// Size to content.
    Shrink,
}

impl Dimension {
    #[must_use]
    pub const fn percent(percent: u16) -> Self {
        Dimension::Relative { percent, offset: 0 }
    }

    #[must_use]
    pub const fn relative(percent: u16, offset: i32) -> Self {
        Dimension::Relative { percent, offset }
    }

    /// Resolve against a parent length. `content` is used for [`Dimension::Shrink`].
    #[must_use]
    pub fn resolve(self, total: u16, content: u16) -> u16 {
        match self {
            Dimension::Fixed(cells) => cells,
            Dimension::Relative { percent, offset } => {
                let base = i64::from(total) * i64::from(percent) / 100;
                (base + i64::from(offset)).clamp(0, i64::from(u16::MAX)) as u16
            }
            Dimension::Shrink => content,
        }
    }
}

impl FromStr for Dimension {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || UiError::Precondition(format!("invalid dimension '{s}'"));

        if s == "shrink" {
            return Ok(Dimension::Shrink);
        }

        let Some((percent, rest)) = s.split_once('%') else {
            return s.parse::<u16>().map(Dimension::Fixed).map_err(|_| invalid());
        };

        let percent = percent.parse::<u16>().map_err(|_| invalid())?;
        if percent > 100 {
            return Err(invalid());
        }

        let offset = match rest.chars().next() {
            None => 0,
            Some('+') => rest[1..].parse::<i32>().map_err(|_| invalid())?,
            Some('-') => -rest[1..].parse::<i32>().map_err(|_| invalid())?,
            Some(_) => return Err(invalid()),
        };

        Ok(Dimension::Relative { percent, offset })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Fixed(cells) => write!(f, "{cells}"),
            Dimension::Relative { percent, offset: 0 } => write!(f, "{percent}%"),
            Dimension::Relative { percent, offset } if *offset > 0 => write!(f, "{percent}%+{offset}"),
            Dimension::Relative { percent, offset } => write!(f, "{percent}%{offset}"),
            Dimension::Shrink => f.write_str("shrink"),
        }
    }
}

/// Colors of a widget, with hover variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleBag {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub hover_fg: Option<Color>,
    pub hover_bg: Option<Color>,
    pub bold: bool,
}

impl StyleBag {
    #[must_use]
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fg(mut self, fg: Color) -> Self {
        self.fg = Some(fg);
        self
    }

    #[must_use]
    pub fn with_hover(mut self, fg: Color, bg: Color) -> Self {
        self.hover_fg = Some(fg);
        self.hover_bg = Some(bg);
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Convert into a ratatui style, using hover colors where set.
    #[must_use]
    pub fn to_style(&self, hovered: bool) -> Style {
        let mut style = Style::default();
        let fg = if hovered { self.hover_fg.or(self.fg) } else { self.fg };
        let bg = if hovered { self.hover_bg.or(self.bg) } else { self.bg };
        if let Some(fg) = fg {
            style = style.fg(fg);
        }
        if let Some(bg) = bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

/// One key/value pair accepted by `Atom::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Width(Dimension),
    Left(Dimension),
    Top(Dimension),
    Height(Dimension),
    Style(StyleBag),
}

impl Property {
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Property::Width(_) => "width",
            Property::Left(_) => "left",
            Property::Top(_) => "top",
            Property::Height(_) => "height",
            Property::Style(_) => "style",
        }
    }
}

/// Layout presets shared by atoms that make room for the channel list.
pub mod presets {
    use super::{Dimension, Property};

    /// Take the full width.
    #[must_use]
    pub fn expand() -> Vec<Property> {
        vec![Property::Width(Dimension::percent(100)), Property::Left(Dimension::percent(0))]
    }

    /// Leave the left quarter for the channel list.
    #[must_use]
    pub fn shrink() -> Vec<Property> {
        vec![Property::Width(Dimension::relative(75, 2)), Property::Left(Dimension::percent(25))]
    }
}
