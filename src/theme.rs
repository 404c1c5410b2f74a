//! Themes: per-component color mappings.
//!
//! A theme file is a JSON object mapping a component name (`channels`, `input`,
//! `header`, `messages`) to its colors:
//!
//! ```json
//! { "channels": { "foregroundColor": "white", "backgroundColor": "#1e1e2e",
//!                 "foregroundColorHover": "black", "backgroundColorHover": "white" } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_THEME, THEME_CHANNELS, THEME_HEADER, THEME_INPUT, THEME_MESSAGES};
use crate::ui::core::properties::StyleBag;
use crate::utils::color::parse_color;

/// Colors for one UI component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTheme {
    pub foreground_color: String,
    pub background_color: String,
    #[serde(default)]
    pub foreground_color_hover: Option<String>,
    #[serde(default)]
    pub background_color_hover: Option<String>,
}

impl ComponentTheme {
    pub fn new(foreground: &str, background: &str) -> Self {
        Self {
            foreground_color: foreground.to_string(),
            background_color: background.to_string(),
            foreground_color_hover: None,
            background_color_hover: None,
        }
    }

    #[must_use]
    pub fn with_hover(mut self, foreground: &str, background: &str) -> Self {
        self.foreground_color_hover = Some(foreground.to_string());
        self.background_color_hover = Some(background.to_string());
        self
    }

    /// Convert to a style bag. Unparseable colors are left unset.
    pub fn style(&self) -> StyleBag {
        let parse = |value: &str| parse_color(value).ok();
        StyleBag {
            fg: parse(self.foreground_color.as_str()),
            bg: parse(self.background_color.as_str()),
            hover_fg: self.foreground_color_hover.as_deref().and_then(parse),
            hover_bg: self.background_color_hover.as_deref().and_then(parse),
            bold: false,
        }
    }

    fn validate(&self, component: &str) -> Result<()> {
        let values = [
            Some(&self.foreground_color),
            Some(&self.background_color),
            self.foreground_color_hover.as_ref(),
            self.background_color_hover.as_ref(),
        ];
        for value in values.into_iter().flatten() {
            parse_color(value).map_err(|e| anyhow::anyhow!("Component '{}': {}", component, e))?;
        }
        Ok(())
    }
}

/// A named set of component colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub components: BTreeMap<String, ComponentTheme>,
}

impl Default for Theme {
    fn default() -> Self {
        let components = [
            (THEME_CHANNELS, ComponentTheme::new("white", "black").with_hover("black", "white")),
            (THEME_INPUT, ComponentTheme::new("gray", "black")),
            (THEME_HEADER, ComponentTheme::new("black", "white")),
            (THEME_MESSAGES, ComponentTheme::new("white", "black")),
        ]
        .into_iter()
        .map(|(name, colors)| (name.to_string(), colors))
        .collect();

        Self {
            name: DEFAULT_THEME.to_string(),
            components,
        }
    }
}

impl Theme {
    /// Load a theme by name. The default theme is built in; others are read
    /// from `<directory>/<name>.json`.
    pub fn load<P: AsRef<Path>>(directory: P, name: &str) -> Result<Self> {
        if name == DEFAULT_THEME {
            return Ok(Self::default());
        }
        if name.contains(['/', '\\']) || name.starts_with('.') {
            anyhow::bail!("Invalid theme name '{}'", name);
        }

        let path = directory.as_ref().join(format!("{name}.json"));
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read theme file: {}", path.display()))?;
        Self::from_json(name, &content).with_context(|| format!("Failed to load theme file: {}", path.display()))
    }

    /// Parse and validate theme JSON.
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let components: BTreeMap<String, ComponentTheme> =
            serde_json::from_str(json).context("Theme is not a valid component color mapping")?;
        let theme = Self {
            name: name.to_string(),
            components,
        };
        theme.validate()?;
        Ok(theme)
    }

    pub fn validate(&self) -> Result<()> {
        if self.components.is_empty() {
            anyhow::bail!("Theme '{}' defines no components", self.name);
        }
        for (component, colors) in &self.components {
            colors.validate(component)?;
        }
        Ok(())
    }

    pub fn component(&self, name: &str) -> Option<&ComponentTheme> {
        self.components.get(name)
    }

    /// Style for `component`, falling back to the terminal's default colors.
    pub fn style_for(&self, component: &str) -> StyleBag {
        self.component(component)
            .map(ComponentTheme::style)
            .unwrap_or_else(|| StyleBag::new(Color::Reset, Color::Reset))
    }
}
