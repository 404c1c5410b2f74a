//! The input line at the bottom of the screen.

use async_trait::async_trait;

use super::channels::Channels;
use super::themed;
use crate::constants::THEME_INPUT;
use crate::theme::Theme;
use crate::ui::core::atom::{Atom, AtomCore};
use crate::ui::core::error::UiError;
use crate::ui::core::events::Topic;
use crate::ui::core::manager::ManagerRef;
use crate::ui::core::properties::{presets, Dimension};
use crate::ui::core::text_atom::{replace_widget_text, widget_text, TextAtom};
use crate::ui::core::widget::{Element, ElementLayout};

pub struct Composer {
    core: AtomCore,
}

impl Composer {
    pub fn new(manager: ManagerRef) -> Self {
        let style = manager
            .upgrade()
            .map(|manager| manager.theme().style_for(THEME_INPUT))
            .unwrap_or_else(|| Theme::default().style_for(THEME_INPUT));
        let element = Element::new(ElementLayout {
            bottom: Some(Dimension::Fixed(0)),
            left: Dimension::percent(0),
            width: Dimension::percent(100),
            height: Dimension::Fixed(3),
            padding: 1,
            ..ElementLayout::default()
        })
        .with_style(style);

        Self {
            core: AtomCore::new("composer", manager, element),
        }
    }

    /// Remove the last character. Returns `false` if the text was empty.
    pub fn backspace(&self) -> Result<bool, UiError> {
        let mut text = self.text();
        if text.pop().is_none() {
            return Ok(false);
        }
        self.set_text(&text)?;
        Ok(true)
    }

    /// Current text with surrounding whitespace removed, clearing the input.
    pub fn take_text(&self) -> Result<String, UiError> {
        let text = self.text().trim().to_string();
        self.clear_text()?;
        Ok(text)
    }
}

#[async_trait(?Send)]
impl Atom for Composer {
    fn core(&self) -> &AtomCore {
        &self.core
    }

    async fn init(&self) -> Result<(), UiError> {
        let manager = self.core.manager()?;
        let channels = manager.require::<Channels>()?;
        self.update_on(channels.events(), Topic::Shown, presets::shrink())?;
        self.update_on(channels.events(), Topic::Hidden, presets::expand())?;
        self.core
            .update_on_with(manager.events(), Topic::ThemeChanged, themed(THEME_INPUT))?;
        Ok(())
    }
}

impl TextAtom for Composer {
    fn text(&self) -> String {
        widget_text(&self.core)
    }

    fn set_text(&self, text: &str) -> Result<(), UiError> {
        replace_widget_text(&self.core, text).map(|_| ())
    }
}
