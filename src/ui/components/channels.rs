//! Channel list shown on the left edge of the screen.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use log::debug;

use crate::constants::{CHANNEL_NAME_ELLIPSIS, CHANNEL_NAME_KEEP_LEN, CHANNEL_NAME_MAX_LEN, THEME_CHANNELS};
use crate::theme::Theme;
use crate::ui::core::atom::{Atom, AtomCore};
use crate::ui::core::error::UiError;
use crate::ui::core::events::{Event, Topic};
use crate::ui::core::manager::ManagerRef;
use crate::ui::core::properties::{Dimension, Property};
use crate::ui::core::widget::{Element, ElementLayout, Widget};

const PLACEHOLDER: char = '?';

/// Channel names as given by the client, plus the active one.
#[derive(Debug, Default)]
struct ChannelList {
    names: Vec<String>,
    active: Option<String>,
}

/// Toggleable list of the text channels in the active group.
pub struct Channels {
    core: AtomCore,
    list: Rc<RefCell<ChannelList>>,
}

impl Channels {
    pub fn new(manager: ManagerRef) -> Self {
        let style = current_theme(&manager).style_for(THEME_CHANNELS);
        let element = Element::new(ElementLayout {
            top: Some(Dimension::percent(0)),
            left: Dimension::percent(0),
            width: Dimension::percent(25),
            height: Dimension::percent(100),
            padding: 1,
            ..ElementLayout::default()
        })
        .with_style(style)
        .hidden(true)
        .scrollable(true);

        Self {
            core: AtomCore::new("channels", manager, element),
            list: Rc::new(RefCell::new(ChannelList::default())),
        }
    }

    /// Replace the listed channels and mark `active` as the current one.
    pub fn set_channels<S: AsRef<str>>(&self, names: &[S], active: Option<&str>) -> Result<(), UiError> {
        self.core.ensure_attached("list channels in")?;
        {
            let mut list = self.list.borrow_mut();
            list.names = names.iter().map(|name| name.as_ref().to_string()).collect();
            list.active = active.map(str::to_string);
        }
        debug!("Listing {} channels", names.len());

        let theme = current_theme_of(&self.core);
        self.core.with_lock(|| rebuild(&self.core, &self.list.borrow(), &theme))
    }

    /// Labels of the listed entries, in display order.
    pub fn labels(&self) -> Vec<String> {
        self.list.borrow().names.iter().map(|name| display_name(name)).collect()
    }

    pub fn active(&self) -> Option<String> {
        self.list.borrow().active.clone()
    }

    /// Channel whose entry was painted at (`column`, `row`) in the last frame.
    pub fn channel_at(&self, column: u16, row: u16) -> Option<String> {
        let index = self.core.with_widget(|widget| widget.hit_child(column, row))?;
        self.list.borrow().names.get(index).cloned()
    }

    /// Mark `name` as the active channel without changing the list.
    pub fn set_active(&self, name: Option<&str>) -> Result<(), UiError> {
        self.core.ensure_attached("select channel in")?;
        self.list.borrow_mut().active = name.map(str::to_string);
        let theme = current_theme_of(&self.core);
        self.core.with_lock(|| rebuild(&self.core, &self.list.borrow(), &theme))
    }
}

#[async_trait(?Send)]
impl Atom for Channels {
    fn core(&self) -> &AtomCore {
        &self.core
    }

    async fn init(&self) -> Result<(), UiError> {
        let manager = self.core.manager()?;
        let list = Rc::clone(&self.list);
        self.core.react_on(manager.events(), Topic::ThemeChanged, move |core, event| {
            let Event::ThemeChanged(theme) = event else {
                return Ok(());
            };
            core.with_lock(|| {
                core.update(&[Property::Style(theme.style_for(THEME_CHANNELS))])?;
                rebuild(core, &list.borrow(), theme)
            })
        })?;
        Ok(())
    }
}

/// Label shown for a channel: `#` followed by the sanitized, truncated name.
///
/// Every run of characters outside `[a-z0-9-_]` collapses into a single `?`,
/// and names longer than 25 characters keep their first 21 followed by ` ...`.
pub fn display_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push(PLACEHOLDER);
            in_run = true;
        }
    }

    if sanitized.chars().count() > CHANNEL_NAME_MAX_LEN {
        sanitized = sanitized.chars().take(CHANNEL_NAME_KEEP_LEN).collect();
        sanitized.push_str(CHANNEL_NAME_ELLIPSIS);
    }
    format!("#{sanitized}")
}

fn rebuild(core: &AtomCore, list: &ChannelList, theme: &Theme) -> Result<(), UiError> {
    let style = theme.style_for(THEME_CHANNELS);
    core.with_widget_mut(|widget| {
        widget.clear_children();
        for (row, name) in list.names.iter().enumerate() {
            let active = list.active.as_deref() == Some(name.as_str());
            let top = u16::try_from(row).unwrap_or(u16::MAX);
            let entry = Element::new(ElementLayout {
                top: Some(Dimension::Fixed(top)),
                height: Dimension::Fixed(1),
                ..ElementLayout::default()
            })
            .with_style(style.with_bold(active))
            .with_content(display_name(name));
            widget.append(entry);
        }
    });
    core.render()
}

fn current_theme(manager: &ManagerRef) -> Rc<Theme> {
    manager
        .upgrade()
        .map(|manager| manager.theme())
        .unwrap_or_else(|| Rc::new(Theme::default()))
}

fn current_theme_of(core: &AtomCore) -> Rc<Theme> {
    core.manager()
        .map(|manager| manager.theme())
        .unwrap_or_else(|_| Rc::new(Theme::default()))
}
