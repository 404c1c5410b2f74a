//! Atoms with editable text.

use super::atom::{Atom, AtomCore};
use super::error::UiError;
use super::events::Event;

/// An [`Atom`] exposing a mutable text value.
///
/// `set_text` with the current value must not emit events or render.
pub trait TextAtom: Atom {
    fn text(&self) -> String;

    fn set_text(&self, text: &str) -> Result<(), UiError>;

    fn append_text(&self, text: &str) -> Result<(), UiError> {
        let mut current = self.text();
        current.push_str(text);
        self.set_text(&current)
    }

    /// Set the text to empty and emit [`Event::TextCleared`].
    fn clear_text(&self) -> Result<(), UiError> {
        self.set_text("")?;
        self.events().emit(Event::TextCleared);
        Ok(())
    }
}

/// Text held in the atom's widget, one content line per `\n`-separated line.
pub fn widget_text(core: &AtomCore) -> String {
    core.with_widget(|widget| widget.content().join("\n"))
}

/// Replace the widget text, emit [`Event::TextChanged`] and render.
///
/// Returns `false` without side effects if `text` is already current.
pub fn replace_widget_text(core: &AtomCore, text: &str) -> Result<bool, UiError> {
    core.ensure_attached("set text of")?;
    if widget_text(core) == text {
        return Ok(false);
    }

    let lines = if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').map(str::to_string).collect()
    };
    core.with_widget_mut(|widget| widget.set_content(lines));
    core.events().emit(Event::TextChanged(text.to_string()));
    core.render()?;
    Ok(true)
}
