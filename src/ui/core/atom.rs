//! The atom lifecycle contract.
//!
//! An atom wraps exactly one [`Widget`] and gives it a uniform lifecycle:
//! visibility, a render lock, property updates and declarative bindings to
//! events of other components.
//!
//! ```text
//! Unattached -> Attached -> Initialized -> Destroyed
//! ```
//!
//! The lock is orthogonal to the lifecycle and only gates [`AtomCore::render`].
//! Renders requested while locked are coalesced into a single render on unlock.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use log::{debug, warn};
use uuid::Uuid;

use super::error::{Lifecycle, UiError};
use super::events::{Event, EventEmitter, Subscription, Topic};
use super::manager::{ManagerRef, UiManager};
use super::properties::Property;
use super::widget::{Node, Widget};

/// Stable identity of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomId(Uuid);

impl AtomId {
    fn new() -> Self {
        AtomId(Uuid::new_v4())
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Upcasting helpers so tracked atoms can be looked up by concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A renderable terminal component managed by the [`UiManager`].
///
/// Implementors hold an [`AtomCore`] and provide [`Atom::init`]; everything else
/// has a default that forwards to the core.
#[async_trait(?Send)]
pub trait Atom: AsAny {
    fn core(&self) -> &AtomCore;

    /// Runs once, after attachment. Register bindings to other atoms here.
    async fn init(&self) -> Result<(), UiError>;

    /// Called by [`Atom::destroy`] before the widget is released.
    fn on_destroy(&self) {}

    fn id(&self) -> AtomId {
        self.core().id()
    }

    fn name(&self) -> &'static str {
        self.core().name()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.core().lifecycle()
    }

    fn events(&self) -> &EventEmitter {
        self.core().events()
    }

    fn is_visible(&self) -> bool {
        self.core().is_visible()
    }

    fn is_locked(&self) -> bool {
        self.core().is_locked()
    }

    fn set_visibility(&self, visible: bool) -> Result<(), UiError> {
        self.core().set_visibility(visible)
    }

    fn show(&self) -> Result<(), UiError> {
        self.core().show()
    }

    fn hide(&self) -> Result<(), UiError> {
        self.core().hide()
    }

    fn toggle_visibility(&self) -> Result<(), UiError> {
        self.core().toggle_visibility()
    }

    fn set_locked(&self, locked: bool) -> Result<(), UiError> {
        self.core().set_locked(locked)
    }

    fn lock(&self) -> Result<(), UiError> {
        self.core().lock()
    }

    fn unlock(&self) -> Result<(), UiError> {
        self.core().unlock()
    }

    fn render(&self) -> Result<(), UiError> {
        self.core().render()
    }

    fn update(&self, properties: &[Property]) -> Result<(), UiError> {
        self.core().update(properties)
    }

    fn update_on(&self, source: &EventEmitter, topic: Topic, properties: Vec<Property>) -> Result<Subscription, UiError> {
        self.core().update_on(source, topic, properties)
    }

    fn destroy(&self) -> Result<(), UiError> {
        self.core().ensure_alive("destroy")?;
        self.on_destroy();
        self.core().destroy()
    }
}

struct AtomInner {
    id: AtomId,
    name: &'static str,
    widget: RefCell<Box<dyn Widget>>,
    state: Cell<Lifecycle>,
    locked: Cell<bool>,
    render_pending: Cell<bool>,
    events: EventEmitter,
    bindings: RefCell<Vec<Subscription>>,
    manager: ManagerRef,
}

/// State and behaviour shared by every atom.
pub struct AtomCore {
    inner: Rc<AtomInner>,
}

impl AtomCore {
    pub fn new(name: &'static str, manager: ManagerRef, widget: impl Widget + 'static) -> Self {
        Self {
            inner: Rc::new(AtomInner {
                id: AtomId::new(),
                name,
                widget: RefCell::new(Box::new(widget)),
                state: Cell::new(Lifecycle::Unattached),
                locked: Cell::new(false),
                render_pending: Cell::new(false),
                events: EventEmitter::new(),
                bindings: RefCell::new(Vec::new()),
                manager,
            }),
        }
    }

    pub fn id(&self) -> AtomId {
        self.inner.id
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.state.get()
    }

    pub fn events(&self) -> &EventEmitter {
        &self.inner.events
    }

    /// The owning manager, if it is still alive.
    pub fn manager(&self) -> Result<Rc<UiManager>, UiError> {
        self.inner
            .manager
            .upgrade()
            .ok_or_else(|| UiError::invalid_state(self.name(), self.lifecycle(), "reach the manager of"))
    }

    pub fn is_visible(&self) -> bool {
        self.inner.widget.borrow().is_visible()
    }

    pub fn is_locked(&self) -> bool {
        self.inner.locked.get()
    }

    /// Number of outgoing bindings that are still active.
    pub fn binding_count(&self) -> usize {
        self.inner.bindings.borrow().iter().filter(|sub| sub.is_active()).count()
    }

    /// Read access to the wrapped widget.
    pub fn with_widget<R>(&self, f: impl FnOnce(&dyn Widget) -> R) -> R {
        f(self.inner.widget.borrow().as_ref())
    }

    /// Mutate the wrapped widget. Does not emit events or render.
    pub fn with_widget_mut<R>(&self, f: impl FnOnce(&mut dyn Widget) -> R) -> R {
        f(self.inner.widget.borrow_mut().as_mut())
    }

    pub(crate) fn node(&self) -> Node {
        self.inner.widget.borrow().node()
    }

    pub fn downgrade(&self) -> WeakAtomCore {
        WeakAtomCore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ensure_alive(&self, operation: &'static str) -> Result<(), UiError> {
        match self.lifecycle() {
            Lifecycle::Destroyed => Err(UiError::invalid_state(self.name(), Lifecycle::Destroyed, operation)),
            _ => Ok(()),
        }
    }

    pub fn ensure_attached(&self, operation: &'static str) -> Result<(), UiError> {
        let state = self.lifecycle();
        if state.is_attached() {
            Ok(())
        } else {
            Err(UiError::invalid_state(self.name(), state, operation))
        }
    }

    /// Mark the atom attached to `owner`. Returns `false` if it already was.
    pub(crate) fn attach(&self, owner: &Weak<UiManager>) -> Result<bool, UiError> {
        self.ensure_alive("attach")?;
        if !self.inner.manager.points_to(owner) {
            return Err(UiError::invalid_state(self.name(), self.lifecycle(), "attach to a foreign manager"));
        }
        if self.lifecycle() != Lifecycle::Unattached {
            return Ok(false);
        }
        self.inner.state.set(Lifecycle::Attached);
        Ok(true)
    }

    /// Whether `init` still has to run. Fails for unattached or destroyed atoms.
    pub(crate) fn needs_init(&self) -> Result<bool, UiError> {
        match self.lifecycle() {
            Lifecycle::Attached => Ok(true),
            Lifecycle::Initialized => Ok(false),
            state => Err(UiError::invalid_state(self.name(), state, "initialize")),
        }
    }

    pub(crate) fn mark_initialized(&self) {
        if self.lifecycle() == Lifecycle::Attached {
            self.inner.state.set(Lifecycle::Initialized);
        }
    }

    pub fn set_visibility(&self, visible: bool) -> Result<(), UiError> {
        self.ensure_attached("change visibility of")?;
        {
            let mut widget = self.inner.widget.borrow_mut();
            if widget.is_visible() == visible {
                return Ok(());
            }
            if visible {
                widget.show();
            } else {
                widget.hide();
            }
        }

        self.inner.events.emit(Event::VisibilityChanged(visible));
        self.inner.events.emit(if visible { Event::Shown } else { Event::Hidden });
        self.render()
    }

    pub fn show(&self) -> Result<(), UiError> {
        self.set_visibility(true)
    }

    pub fn hide(&self) -> Result<(), UiError> {
        self.set_visibility(false)
    }

    pub fn toggle_visibility(&self) -> Result<(), UiError> {
        self.set_visibility(!self.is_visible())
    }

    pub fn set_locked(&self, locked: bool) -> Result<(), UiError> {
        self.ensure_alive("lock")?;
        if self.inner.locked.get() == locked {
            return Ok(());
        }

        self.inner.locked.set(locked);
        self.inner.events.emit(Event::LockChanged(locked));

        if !locked && self.inner.render_pending.get() {
            self.render()?;
        }
        Ok(())
    }

    pub fn lock(&self) -> Result<(), UiError> {
        self.set_locked(true)
    }

    pub fn unlock(&self) -> Result<(), UiError> {
        self.set_locked(false)
    }

    /// Hold the lock while `callback` runs and release it on every exit path.
    ///
    /// A lock that was already held when this was called is left in place.
    pub async fn lock_until<F, Fut, T>(&self, callback: F) -> Result<T, UiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UiError>>,
    {
        let acquired = !self.is_locked();
        self.lock()?;
        let _guard = LockGuard { core: self, acquired };
        callback().await
    }

    /// Synchronous form of [`AtomCore::lock_until`].
    pub fn with_lock<T>(&self, callback: impl FnOnce() -> Result<T, UiError>) -> Result<T, UiError> {
        let acquired = !self.is_locked();
        self.lock()?;
        let _guard = LockGuard { core: self, acquired };
        callback()
    }

    /// Render the widget unless locked. Calling this redundantly is harmless.
    pub fn render(&self) -> Result<(), UiError> {
        self.ensure_attached("render")?;
        if self.inner.locked.get() {
            self.inner.render_pending.set(true);
            return Ok(());
        }

        self.inner.render_pending.set(false);
        self.inner.widget.borrow_mut().render();
        self.inner.events.emit(Event::Render);
        Ok(())
    }

    /// Apply `properties` in order, emitting one event per property, then render.
    pub fn update(&self, properties: &[Property]) -> Result<(), UiError> {
        self.ensure_attached("update")?;
        for property in properties {
            self.inner.widget.borrow_mut().apply(property);
            self.inner.events.emit(Event::PropertyUpdate(property.clone()));
        }
        self.render()
    }

    /// Apply `properties` whenever `source` emits `topic`.
    pub fn update_on(&self, source: &EventEmitter, topic: Topic, properties: Vec<Property>) -> Result<Subscription, UiError> {
        self.update_on_with(source, topic, move |_| Some(properties.clone()))
    }

    /// Apply the properties produced by `mapper` whenever `source` emits `topic`.
    /// `None` from the mapper skips the update.
    pub fn update_on_with<F>(&self, source: &EventEmitter, topic: Topic, mapper: F) -> Result<Subscription, UiError>
    where
        F: Fn(&Event) -> Option<Vec<Property>> + 'static,
    {
        self.react_on(source, topic, move |core, event| match mapper(event) {
            Some(properties) => core.update(&properties),
            None => Ok(()),
        })
    }

    /// Run `handler` against this atom whenever `source` emits `topic`.
    ///
    /// The subscription is tracked as an outgoing binding and cancelled by
    /// [`AtomCore::destroy`].
    pub fn react_on<F>(&self, source: &EventEmitter, topic: Topic, handler: F) -> Result<Subscription, UiError>
    where
        F: Fn(&AtomCore, &Event) -> Result<(), UiError> + 'static,
    {
        self.ensure_attached("bind")?;
        let target = self.downgrade();
        let subscription = source.subscribe(topic, move |event| match target.upgrade() {
            Some(core) => handler(&core, event),
            None => Ok(()),
        });

        let mut bindings = self.inner.bindings.borrow_mut();
        bindings.retain(Subscription::is_active);
        bindings.push(subscription.clone());
        debug!("Bound atom '{}' to {:?}", self.name(), topic);
        Ok(subscription)
    }

    /// Release the widget and every binding. The atom cannot be used afterwards.
    pub fn destroy(&self) -> Result<(), UiError> {
        self.ensure_alive("destroy")?;

        for subscription in self.inner.bindings.borrow_mut().drain(..) {
            subscription.cancel();
        }
        self.inner.widget.borrow_mut().destroy();
        self.inner.state.set(Lifecycle::Destroyed);
        self.inner.locked.set(false);
        self.inner.render_pending.set(false);

        self.inner.events.emit(Event::Destroy);
        self.inner.events.clear();
        debug!("Destroyed atom '{}' ({})", self.name(), self.id());
        Ok(())
    }
}

impl fmt::Debug for AtomCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomCore")
            .field("name", &self.name())
            .field("id", &self.id())
            .field("state", &self.lifecycle())
            .field("locked", &self.is_locked())
            .finish()
    }
}

/// Non-owning handle to an [`AtomCore`], used by bindings and timers.
#[derive(Clone)]
pub struct WeakAtomCore {
    inner: Weak<AtomInner>,
}

impl WeakAtomCore {
    pub fn upgrade(&self) -> Option<AtomCore> {
        self.inner.upgrade().map(|inner| AtomCore { inner })
    }
}

struct LockGuard<'a> {
    core: &'a AtomCore,
    acquired: bool,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.acquired || self.core.lifecycle() == Lifecycle::Destroyed {
            return;
        }
        if let Err(e) = self.core.unlock() {
            warn!("Failed to release lock on '{}': {}", self.core.name(), e);
        }
    }
}
