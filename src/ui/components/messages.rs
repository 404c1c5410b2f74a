//! Scrolling message log and the formatting of its lines.

use std::cell::RefCell;

use async_trait::async_trait;
use log::trace;

use super::channels::Channels;
use super::themed;
use crate::config::UiConfig;
use crate::constants::{SENDER_SYSTEM, THEME_MESSAGES};
use crate::theme::Theme;
use crate::ui::core::atom::{Atom, AtomCore};
use crate::ui::core::error::UiError;
use crate::ui::core::events::Topic;
use crate::ui::core::manager::ManagerRef;
use crate::ui::core::properties::{presets, Dimension};
use crate::ui::core::widget::{Element, ElementLayout};
use crate::utils::markup;

/// Builds message lines from a `{sender}` / `{message}` template.
///
/// Pinned words are highlighted in every message except system lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFormatter {
    format: String,
    word_pins: Vec<String>,
}

impl MessageFormatter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            word_pins: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_word_pins(mut self, word_pins: &[String]) -> Self {
        self.word_pins = word_pins.to_vec();
        self
    }

    pub fn word_pins(&self) -> &[String] {
        &self.word_pins
    }

    /// Pin `word`, or unpin it if already pinned. Returns whether it is now pinned.
    pub fn toggle_pin(&mut self, word: &str) -> bool {
        match self.word_pins.iter().position(|pin| pin == word) {
            Some(index) => {
                self.word_pins.remove(index);
                false
            }
            None => {
                self.word_pins.push(word.to_string());
                true
            }
        }
    }

    pub fn create(&self, sender: &str, message: &str) -> String {
        self.fill(sender, &self.highlight(message))
    }

    pub fn system(&self, message: &str) -> String {
        self.fill(&format!("{{bold}}{SENDER_SYSTEM}{{/bold}}"), message)
    }

    /// A message from another user. Each modifier is prepended to the name, so
    /// the last one ends up first.
    pub fn user(&self, sender: &str, message: &str, modifiers: &[&str]) -> String {
        let name = modifiers
            .iter()
            .fold(format!("@{sender}"), |name, modifier| format!("{modifier}{name}"));
        self.create(&name, message)
    }

    /// A message sent by the connected user.
    pub fn own(&self, sender: &str, message: &str) -> String {
        self.create(&format!("@{{bold}}{sender}{{/bold}}"), message)
    }

    /// A message relayed through a special source such as a bot or webhook.
    pub fn special(&self, prefix: &str, sender: &str, message: &str) -> String {
        self.create(&format!("{prefix} ~> @{{bold}}{sender}{{/bold}}"), message)
    }

    // Placeholders are substituted in one pass so values are never rescanned.
    fn fill(&self, sender: &str, message: &str) -> String {
        let mut line = String::with_capacity(self.format.len() + sender.len() + message.len());
        let mut rest = self.format.as_str();

        while let Some(index) = rest.find('{') {
            line.push_str(&rest[..index]);
            rest = &rest[index..];
            if let Some(tail) = rest.strip_prefix("{sender}") {
                line.push_str(sender);
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix("{message}") {
                line.push_str(message);
                rest = tail;
            } else {
                line.push('{');
                rest = &rest[1..];
            }
        }
        line.push_str(rest);
        line
    }

    fn highlight(&self, message: &str) -> String {
        if self.word_pins.is_empty() {
            return message.to_string();
        }
        message
            .split(' ')
            .map(|word| {
                if self.word_pins.iter().any(|pin| pin == word) {
                    markup::pin(word)
                } else {
                    word.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(UiConfig::default().message_format)
    }
}

pub struct Messages {
    core: AtomCore,
    formatter: RefCell<MessageFormatter>,
    capacity: usize,
}

impl Messages {
    pub fn new(manager: ManagerRef) -> Self {
        let (style, config) = match manager.upgrade() {
            Some(manager) => (manager.theme().style_for(THEME_MESSAGES), manager.config().clone()),
            None => (Theme::default().style_for(THEME_MESSAGES), UiConfig::default()),
        };
        let element = Element::new(ElementLayout {
            top: Some(Dimension::percent(0)),
            left: Dimension::percent(0),
            width: Dimension::percent(100),
            height: Dimension::relative(100, -3),
            padding: 1,
            ..ElementLayout::default()
        })
        .with_style(style)
        .scrollable(true);

        Self {
            core: AtomCore::new("messages", manager, element),
            formatter: RefCell::new(MessageFormatter::new(config.message_format).with_word_pins(&config.word_pins)),
            capacity: config.max_messages.max(1),
        }
    }

    pub fn formatter(&self) -> MessageFormatter {
        self.formatter.borrow().clone()
    }

    /// Pin `word`, or unpin it if already pinned. Affects lines added afterwards.
    pub fn toggle_pin(&self, word: &str) -> bool {
        self.formatter.borrow_mut().toggle_pin(word)
    }

    /// Append a preformatted line, dropping the oldest lines beyond capacity.
    pub fn add_message(&self, line: &str) -> Result<(), UiError> {
        self.core.ensure_attached("add a message to")?;
        trace!("Message: {}", line);
        self.core.with_widget_mut(|widget| {
            let mut lines = widget.content();
            lines.push(line.to_string());
            if lines.len() > self.capacity {
                let overflow = lines.len() - self.capacity;
                lines.drain(..overflow);
            }
            widget.set_content(lines);
        });
        self.core.render()
    }

    pub fn system(&self, message: &str) -> Result<(), UiError> {
        let line = self.formatter.borrow().system(message);
        self.add_message(&line)
    }

    pub fn user(&self, sender: &str, message: &str, modifiers: &[&str]) -> Result<(), UiError> {
        let line = self.formatter.borrow().user(sender, message, modifiers);
        self.add_message(&line)
    }

    pub fn own(&self, sender: &str, message: &str) -> Result<(), UiError> {
        let line = self.formatter.borrow().own(sender, message);
        self.add_message(&line)
    }

    pub fn special(&self, prefix: &str, sender: &str, message: &str) -> Result<(), UiError> {
        let line = self.formatter.borrow().special(prefix, sender, message);
        self.add_message(&line)
    }

    pub fn clear_messages(&self) -> Result<(), UiError> {
        self.core.ensure_attached("clear messages of")?;
        self.core.with_widget_mut(|widget| widget.set_content(Vec::new()));
        self.core.render()
    }

    pub fn messages(&self) -> Vec<String> {
        self.core.with_widget(|widget| widget.content())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait(?Send)]
impl Atom for Messages {
    fn core(&self) -> &AtomCore {
        &self.core
    }

    async fn init(&self) -> Result<(), UiError> {
        let manager = self.core.manager()?;
        let channels = manager.require::<Channels>()?;
        self.update_on(channels.events(), Topic::Shown, presets::shrink())?;
        self.update_on(channels.events(), Topic::Hidden, presets::expand())?;
        self.core
            .update_on_with(manager.events(), Topic::ThemeChanged, themed(THEME_MESSAGES))?;
        Ok(())
    }
}
