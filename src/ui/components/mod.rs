//! Concrete atoms of the dashboard.
//!
//! The atoms are wired together declaratively in their `init`: the composer,
//! header and message log make room whenever the channel list is shown, and
//! every atom restyles itself when the manager emits a theme change.

pub mod channels;
pub mod composer;
pub mod header;
pub mod messages;

pub use channels::Channels;
pub use composer::Composer;
pub use header::Header;
pub use messages::{MessageFormatter, Messages};

use crate::ui::core::blueprint::{Blueprint, BlueprintSet};
use crate::ui::core::error::UiError;
use crate::ui::core::events::Event;
use crate::ui::core::properties::Property;

/// Blueprints of the built-in atoms, in attachment (and paint) order.
///
/// The header comes after the message log so it is painted on top of it.
pub fn default_blueprints() -> Result<BlueprintSet, UiError> {
    BlueprintSet::new(vec![
        Blueprint::new(Channels::new).atom(),
        Blueprint::new(Composer::new).text_atom(),
        Blueprint::new(Messages::new).atom(),
        Blueprint::new(Header::new).atom(),
    ])
}

/// Binding mapper that restyles an atom from the `component` entry of a new theme.
pub(crate) fn themed(component: &'static str) -> impl Fn(&Event) -> Option<Vec<Property>> {
    move |event| match event {
        Event::ThemeChanged(theme) => Some(vec![Property::Style(theme.style_for(component))]),
        _ => None,
    }
}
