//! Notification bar at the top of the screen.
//!
//! [`Header::display`] with `auto_hide` schedules a local timer; outside
//! [`local::run_until`] it fails with [`UiError::Precondition`].

use std::cell::RefCell;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::task::JoinHandle;

use super::channels::Channels;
use super::themed;
use crate::constants::{DEFAULT_HEADER_AUTO_HIDE_PER_CHAR_MS, THEME_HEADER};
use crate::theme::Theme;
use crate::ui::core::atom::{Atom, AtomCore};
use crate::ui::core::error::UiError;
use crate::ui::core::events::Topic;
use crate::ui::core::local;
use crate::ui::core::manager::ManagerRef;
use crate::ui::core::properties::{presets, Dimension};
use crate::ui::core::widget::{Element, ElementLayout};
use crate::utils::markup;

pub struct Header {
    core: AtomCore,
    hide_timer: RefCell<Option<JoinHandle<()>>>,
}

impl Header {
    pub fn new(manager: ManagerRef) -> Self {
        let style = manager
            .upgrade()
            .map(|manager| manager.theme().style_for(THEME_HEADER))
            .unwrap_or_else(|| Theme::default().style_for(THEME_HEADER));
        let element = Element::new(ElementLayout {
            top: Some(Dimension::percent(0)),
            left: Dimension::percent(0),
            width: Dimension::percent(100),
            height: Dimension::Fixed(3),
            padding: 1,
            ..ElementLayout::default()
        })
        .with_style(style)
        .hidden(true);

        Self {
            core: AtomCore::new("header", manager, element),
            hide_timer: RefCell::new(None),
        }
    }

    /// Show `text` in the header.
    ///
    /// With `auto_hide` the header hides itself after a delay proportional to the
    /// visible length of `text`. A newer call cancels any pending hide.
    pub fn display(&self, text: &str, auto_hide: bool) -> Result<(), UiError> {
        if text.trim().is_empty() {
            return Err(UiError::Precondition("header text cannot be empty".to_string()));
        }
        self.core.ensure_attached("display text in")?;
        if auto_hide && !local::is_active() {
            return Err(UiError::Precondition(
                "auto-hide needs the UI task context".to_string(),
            ));
        }
        self.cancel_auto_hide();

        self.core.with_lock(|| {
            self.core
                .with_widget_mut(|widget| widget.set_content(vec![text.to_string()]));
            self.core.show()?;
            self.core.render()
        })?;

        if auto_hide {
            let delay = self.hide_delay(text);
            debug!("Hiding header in {:?}", delay);
            self.schedule_hide(delay)?;
        }
        Ok(())
    }

    /// Text currently held by the header.
    pub fn text(&self) -> String {
        self.core.with_widget(|widget| widget.content().join("\n"))
    }

    /// Cancel a pending auto-hide. Returns `true` if one was pending.
    pub fn cancel_auto_hide(&self) -> bool {
        match self.hide_timer.borrow_mut().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    fn hide_delay(&self, text: &str) -> Duration {
        let per_char = self
            .core
            .manager()
            .map(|manager| manager.config().header_auto_hide_per_char_ms)
            .unwrap_or(DEFAULT_HEADER_AUTO_HIDE_PER_CHAR_MS);
        let chars = markup::strip_tags(text).chars().count() as u64;
        Duration::from_millis(per_char.saturating_mul(chars))
    }

    fn schedule_hide(&self, delay: Duration) -> Result<(), UiError> {
        let target = self.core.downgrade();
        let handle = local::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(core) = target.upgrade() else {
                return;
            };
            if core.lifecycle().is_attached() {
                if let Err(e) = core.hide() {
                    warn!("Failed to auto-hide header: {}", e);
                }
            }
        })?;
        *self.hide_timer.borrow_mut() = Some(handle);
        Ok(())
    }
}

#[async_trait(?Send)]
impl Atom for Header {
    fn core(&self) -> &AtomCore {
        &self.core
    }

    async fn init(&self) -> Result<(), UiError> {
        let manager = self.core.manager()?;
        let channels = manager.require::<Channels>()?;
        self.update_on(channels.events(), Topic::Shown, presets::shrink())?;
        self.update_on(channels.events(), Topic::Hidden, presets::expand())?;
        self.core
            .update_on_with(manager.events(), Topic::ThemeChanged, themed(THEME_HEADER))?;
        Ok(())
    }

    fn on_destroy(&self) {
        self.cancel_auto_hide();
    }
}
