//! The UI manager: sole owner of the render surface and registry of attached atoms.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, info};
use ratatui::Frame;

use super::atom::{AsAny, Atom};
use super::blueprint::{BlueprintSet, Contract};
use super::context::NavigationContext;
use super::error::UiError;
use super::events::{Event, EventEmitter, Topic};
use super::surface::{Redraw, Surface};
use crate::config::UiConfig;
use crate::theme::Theme;

/// Non-owning reference from an atom back to its manager.
#[derive(Clone, Default)]
pub struct ManagerRef {
    inner: Weak<UiManager>,
}

impl ManagerRef {
    /// A reference that never resolves. Atoms built with it cannot be attached.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn upgrade(&self) -> Option<Rc<UiManager>> {
        self.inner.upgrade()
    }

    pub(crate) fn points_to(&self, manager: &Weak<UiManager>) -> bool {
        self.inner.upgrade().is_some() && self.inner.ptr_eq(manager)
    }
}

impl fmt::Debug for ManagerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerRef")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Owns the render surface, activates atoms from blueprints, attaches and
/// initializes them, and exposes the global render and title operations.
pub struct UiManager {
    this: Weak<UiManager>,
    surface: RefCell<Box<dyn Surface>>,
    atoms: RefCell<Vec<Rc<dyn Atom>>>,
    events: EventEmitter,
    navigation: RefCell<NavigationContext>,
    theme: RefCell<Rc<Theme>>,
    config: UiConfig,
}

impl UiManager {
    /// Validate `blueprints`, then activate and attach one atom per blueprint.
    ///
    /// Fails with [`UiError::Configuration`] if any blueprint does not produce an atom.
    pub fn new(blueprints: &BlueprintSet, surface: impl Surface + 'static, config: UiConfig) -> Result<Rc<Self>, UiError> {
        if !blueprints.instance_of(Contract::Atom) {
            return Err(UiError::Configuration(format!(
                "blueprints do not describe atoms: {}",
                blueprints.nonconforming(Contract::Atom).join(", ")
            )));
        }

        let manager = Rc::new_cyclic(|this| UiManager {
            this: this.clone(),
            surface: RefCell::new(Box::new(surface)),
            atoms: RefCell::new(Vec::new()),
            events: EventEmitter::new(),
            navigation: RefCell::new(NavigationContext::default()),
            theme: RefCell::new(Rc::new(Theme::default())),
            config,
        });

        let atoms = blueprints.activate_atoms(&manager.handle())?;
        manager.attach_atoms(&atoms)?;
        info!("UI manager created with {} atoms", manager.atom_count());
        Ok(manager)
    }

    /// Reference handed to atoms activated for this manager.
    pub fn handle(&self) -> ManagerRef {
        ManagerRef {
            inner: self.this.clone(),
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Attach atoms to the surface. Already tracked atoms are skipped.
    ///
    /// Returns the number of newly attached atoms.
    pub fn attach_atoms(&self, atoms: &[Rc<dyn Atom>]) -> Result<usize, UiError> {
        let mut attached = 0;
        for atom in atoms {
            let id = atom.id();
            if self.is_tracked(atom.as_ref()) || !atom.core().attach(&self.this)? {
                continue;
            }

            let node = atom.core().node();
            self.atoms.borrow_mut().push(Rc::clone(atom));
            self.surface.borrow_mut().append(node.clone());

            let manager = self.this.clone();
            let _ = atom.events().subscribe(Topic::Destroy, move |_| {
                if let Some(manager) = manager.upgrade() {
                    manager.atoms.borrow_mut().retain(|tracked| tracked.id() != id);
                    manager.surface.borrow_mut().remove(&node);
                }
                Ok(())
            });

            debug!("Attached atom '{}' ({})", atom.name(), id);
            self.events.emit(Event::AtomAttached(id));
            attached += 1;
        }
        Ok(attached)
    }

    fn is_tracked(&self, atom: &dyn Atom) -> bool {
        let id = atom.id();
        self.atoms.borrow().iter().any(|tracked| tracked.id() == id)
    }

    /// Initialize every tracked atom that has not been initialized yet, one at a
    /// time in attachment order. The first failure aborts the sequence.
    pub async fn init(&self) -> Result<(), UiError> {
        let atoms = self.atoms();
        for atom in atoms {
            if !atom.core().needs_init()? {
                continue;
            }
            debug!("Initializing atom '{}'", atom.name());
            atom.init().await?;
            atom.core().mark_initialized();
        }
        info!("UI manager initialized");
        Ok(())
    }

    /// Tracked atoms in attachment order.
    pub fn atoms(&self) -> Vec<Rc<dyn Atom>> {
        self.atoms.borrow().clone()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.borrow().len()
    }

    /// First tracked atom of type `T`.
    pub fn find<T: Atom>(&self) -> Option<Rc<T>> {
        self.atoms
            .borrow()
            .iter()
            .find_map(|atom| AsAny::into_any_rc(Rc::clone(atom)).downcast::<T>().ok())
    }

    /// Like [`UiManager::find`], failing when no such atom is attached.
    pub fn require<T: Atom>(&self) -> Result<Rc<T>, UiError> {
        self.find::<T>()
            .ok_or_else(|| UiError::Configuration(format!("atom '{}' is not attached", type_name::<T>())))
    }

    /// Queue a redraw of the surface. `hard` forces a full geometry reallocation.
    pub fn render(&self, hard: bool) {
        {
            let mut surface = self.surface.borrow_mut();
            if hard {
                surface.realloc();
            } else {
                surface.render();
            }
        }
        self.events.emit(Event::SurfaceRendered { hard });
    }

    pub fn set_window_title(&self, title: &str) {
        self.surface.borrow_mut().set_title(title);
        self.events.emit(Event::TitleChanged(title.to_string()));
    }

    pub fn title(&self) -> String {
        self.surface.borrow().title().to_string()
    }

    /// Derive the window title from the navigation context.
    pub fn update_title(&self) {
        let title = self.navigation.borrow().title(&self.config.title);
        self.set_window_title(&title);
    }

    pub fn navigation(&self) -> NavigationContext {
        self.navigation.borrow().clone()
    }

    pub fn set_navigation(&self, navigation: NavigationContext) {
        *self.navigation.borrow_mut() = navigation.clone();
        self.events.emit(Event::NavigationChanged(navigation));
        self.update_title();
    }

    pub fn theme(&self) -> Rc<Theme> {
        Rc::clone(&self.theme.borrow())
    }

    /// Make `theme` current and notify every atom bound to [`Topic::ThemeChanged`].
    pub fn apply_theme(&self, theme: Theme) {
        let theme = Rc::new(theme);
        *self.theme.borrow_mut() = Rc::clone(&theme);
        info!("Applying theme '{}'", theme.name);
        self.events.emit(Event::ThemeChanged(theme));
    }

    /// Pending redraw request from the surface, if any.
    pub fn take_redraw(&self) -> Option<Redraw> {
        self.surface.borrow_mut().take_redraw()
    }

    pub fn take_title(&self) -> Option<String> {
        self.surface.borrow_mut().take_title()
    }

    pub fn hover(&self, column: u16, row: u16) {
        self.surface.borrow_mut().hover(column, row);
    }

    pub fn paint(&self, frame: &mut Frame) {
        self.surface.borrow_mut().paint(frame);
    }

    /// Number of live nodes on the surface.
    pub fn node_count(&self) -> usize {
        self.surface.borrow().node_count()
    }
}

impl fmt::Debug for UiManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiManager")
            .field("atoms", &self.atom_count())
            .field("navigation", &self.navigation.borrow())
            .finish()
    }
}
