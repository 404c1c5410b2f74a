//! Typed publish/subscribe bus used by atoms and the UI manager.
//!
//! Every atom and the manager own an [`EventEmitter`]. Other components subscribe to a
//! [`Topic`] and receive the matching [`Event`] synchronously, in registration order,
//! before `emit` returns.
//!
//! # Invariants
//!
//! 1. Handlers run against a snapshot taken when `emit` starts, so a handler may
//!    subscribe, cancel or emit again without re-entrancy panics.
//! 2. A cancelled subscription is never invoked by a later `emit`.
//! 3. A failing handler is logged and skipped; it never stops delivery to the
//!    remaining handlers and never reaches the emitter's caller.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::warn;

use super::atom::AtomId;
use super::context::NavigationContext;
use super::error::UiError;
use super::properties::Property;
use crate::theme::Theme;

/// Name of an event kind, used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    VisibilityChanged,
    Shown,
    Hidden,
    Destroy,
    Render,
    PropertyUpdate,
    LockChanged,
    TextChanged,
    TextCleared,
    AtomAttached,
    SurfaceRendered,
    TitleChanged,
    ThemeChanged,
    NavigationChanged,
}

/// An event together with its payload.
#[derive(Debug, Clone)]
pub enum Event {
    VisibilityChanged(bool),
    Shown,
    Hidden,
    Destroy,
    Render,
    PropertyUpdate(Property),
    LockChanged(bool),
    TextChanged(String),
    TextCleared,
    AtomAttached(AtomId),
    SurfaceRendered { hard: bool },
    TitleChanged(String),
    ThemeChanged(Rc<Theme>),
    NavigationChanged(NavigationContext),
}

impl Event {
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            Event::VisibilityChanged(_) => Topic::VisibilityChanged,
            Event::Shown => Topic::Shown,
            Event::Hidden => Topic::Hidden,
            Event::Destroy => Topic::Destroy,
            Event::Render => Topic::Render,
            Event::PropertyUpdate(_) => Topic::PropertyUpdate,
            Event::LockChanged(_) => Topic::LockChanged,
            Event::TextChanged(_) => Topic::TextChanged,
            Event::TextCleared => Topic::TextCleared,
            Event::AtomAttached(_) => Topic::AtomAttached,
            Event::SurfaceRendered { .. } => Topic::SurfaceRendered,
            Event::TitleChanged(_) => Topic::TitleChanged,
            Event::ThemeChanged(_) => Topic::ThemeChanged,
            Event::NavigationChanged(_) => Topic::NavigationChanged,
        }
    }
}

type Handler = Rc<dyn Fn(&Event) -> Result<(), UiError>>;

struct HandlerEntry {
    id: u64,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<HandlerEntry>,
}

/// Single-threaded event emitter. Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventEmitter {
    registry: Rc<RefCell<Registry>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`. The returned token cancels the registration.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Event) -> Result<(), UiError> + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.handlers.push(HandlerEntry {
            id,
            topic,
            handler: Rc::new(handler),
        });

        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver `event` to every handler subscribed to its topic.
    ///
    /// Returns the number of handlers invoked, failed ones included.
    pub fn emit(&self, event: Event) -> usize {
        let topic = event.topic();
        let snapshot: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .filter(|entry| entry.topic == topic)
            .map(|entry| Rc::clone(&entry.handler))
            .collect();

        for handler in &snapshot {
            if let Err(e) = handler(&event) {
                warn!("Handler for {:?} failed: {}", topic, e);
            }
        }

        snapshot.len()
    }

    #[must_use]
    pub fn listener_count(&self, topic: Topic) -> usize {
        self.registry
            .borrow()
            .handlers
            .iter()
            .filter(|entry| entry.topic == topic)
            .count()
    }

    /// Drop every subscription registered on this emitter.
    pub fn clear(&self) {
        self.registry.borrow_mut().handlers.clear();
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventEmitter")
            .field("handlers", &registry.handlers.len())
            .finish()
    }
}

/// Token returned by [`EventEmitter::subscribe`].
///
/// Dropping the token leaves the subscription in place; call [`Subscription::cancel`]
/// to remove it.
#[derive(Clone)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Remove the subscription. Returns `false` if it was already gone.
    pub fn cancel(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.handlers.len();
        registry.handlers.retain(|entry| entry.id != self.id);
        registry.handlers.len() != before
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().handlers.iter().any(|entry| entry.id == self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
