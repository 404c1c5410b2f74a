//! Core UI framework for the Chatdeck application.
//!
//! This module contains the building blocks every component is made of: the
//! atom lifecycle, the typed event bus, retained widgets, the render surface and
//! the manager that owns them.
//!
//! # Module Components
//!
//! - [`atom`] - The [`Atom`] trait and its shared [`AtomCore`]
//! - [`text_atom`] - Atoms with editable text
//! - [`blueprint`] - Deferred, validated atom construction
//! - [`manager`] - The [`UiManager`] that owns the surface and attached atoms
//! - [`events`] - Typed topics, events and cancellable subscriptions
//! - [`local`] - The single-threaded task context atom timers run on
//! - [`widget`] / [`surface`] - Retained widgets and the screen that paints them
//! - [`properties`] - Layout and style properties applied through `update`
//! - [`actions`] / [`event_handler`] - Terminal input mapped to application actions
//!
//! # Architecture
//!
//! 1. **Blueprints** describe atoms; the manager activates and attaches them
//! 2. **Atoms** wrap one widget each and bind declaratively to other atoms' events
//! 3. **The manager** coordinates global renders, the window title and themes
//! 4. **The event loop** paints the surface whenever a render was requested

pub mod actions;
pub mod atom;
pub mod blueprint;
pub mod context;
pub mod error;
pub mod event_handler;
pub mod events;
pub mod local;
pub mod manager;
pub mod properties;
pub mod surface;
pub mod text_atom;
pub mod widget;

pub use actions::{Action, Command};
pub use atom::{Atom, AtomCore, AtomId};
pub use blueprint::{Blueprint, BlueprintEntry, BlueprintSet, Contract};
pub use context::NavigationContext;
pub use error::{Lifecycle, UiError};
pub use event_handler::{EventHandler, EventType};
pub use events::{Event, EventEmitter, Subscription, Topic};
pub use manager::{ManagerRef, UiManager};
pub use properties::{Dimension, Property, StyleBag};
pub use surface::{Redraw, Screen, Surface};
pub use text_atom::TextAtom;
pub use widget::{Element, ElementLayout, Node, Widget};
