//! Shared fixtures: probe atoms and event counters.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use chatdeck::config::UiConfig;
use chatdeck::ui::components::default_blueprints;
use chatdeck::ui::core::text_atom::{replace_widget_text, widget_text};
use chatdeck::ui::core::{
    Atom, AtomCore, Blueprint, BlueprintSet, Element, ElementLayout, EventEmitter, ManagerRef, Screen, TextAtom,
    Topic, UiError, UiManager,
};

/// Minimal atom that counts its `init` calls.
pub struct Probe {
    core: AtomCore,
    pub inits: Cell<usize>,
}

impl Probe {
    pub fn new(manager: ManagerRef) -> Self {
        Self {
            core: AtomCore::new("probe", manager, Element::new(ElementLayout::default())),
            inits: Cell::new(0),
        }
    }

    /// Physical render passes of the wrapped widget.
    pub fn render_count(&self) -> usize {
        self.core.with_widget(|widget| widget.render_count())
    }
}

#[async_trait(?Send)]
impl Atom for Probe {
    fn core(&self) -> &AtomCore {
        &self.core
    }

    async fn init(&self) -> Result<(), UiError> {
        self.inits.set(self.inits.get() + 1);
        Ok(())
    }
}

pub struct TextProbe {
    core: AtomCore,
}

impl TextProbe {
    pub fn new(manager: ManagerRef) -> Self {
        Self {
            core: AtomCore::new("text-probe", manager, Element::new(ElementLayout::default())),
        }
    }

    pub fn render_count(&self) -> usize {
        self.core.with_widget(|widget| widget.render_count())
    }
}

#[async_trait(?Send)]
impl Atom for TextProbe {
    fn core(&self) -> &AtomCore {
        &self.core
    }

    async fn init(&self) -> Result<(), UiError> {
        Ok(())
    }
}

impl TextAtom for TextProbe {
    fn text(&self) -> String {
        widget_text(&self.core)
    }

    fn set_text(&self, text: &str) -> Result<(), UiError> {
        replace_widget_text(&self.core, text).map(|_| ())
    }
}

/// A manager holding one [`Probe`] and one [`TextProbe`].
pub fn probe_manager() -> Rc<UiManager> {
    let blueprints = BlueprintSet::new(vec![
        Blueprint::new(Probe::new).atom(),
        Blueprint::new(TextProbe::new).text_atom(),
    ])
    .unwrap();
    UiManager::new(&blueprints, Screen::new("test"), UiConfig::default()).unwrap()
}

/// A manager holding the built-in atoms, not yet initialized.
pub fn dashboard_manager() -> Rc<UiManager> {
    UiManager::new(&default_blueprints().unwrap(), Screen::new("test"), UiConfig::default()).unwrap()
}

pub async fn initialized_dashboard() -> Rc<UiManager> {
    let manager = dashboard_manager();
    manager.init().await.unwrap();
    manager
}

/// Count emissions of `topic` on `emitter`.
pub fn counter(emitter: &EventEmitter, topic: Topic) -> Rc<Cell<usize>> {
    let hits = Rc::new(Cell::new(0));
    let count = Rc::clone(&hits);
    let _ = emitter.subscribe(topic, move |_| {
        count.set(count.get() + 1);
        Ok(())
    });
    hits
}
