//! Retained widgets drawn by the render surface.
//!
//! Ratatui draws immediately; atoms need widgets that keep their state between
//! frames. An [`Element`] stores layout, style and content, and the
//! [`Screen`](super::surface::Screen) paints it on every frame through a
//! non-owning [`Node`]. Dropping an element therefore removes it from the surface.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ratatui::layout::{Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Padding, Paragraph};
use ratatui::Frame;

use super::properties::{Dimension, Property, StyleBag};
use crate::utils::markup;

/// Capability set the atom framework needs from a terminal widget.
pub trait Widget {
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;

    fn append(&mut self, child: Element);
    fn remove(&mut self, child: &Node) -> bool;
    fn clear_children(&mut self);
    fn child_count(&self) -> usize;

    /// One physical render pass.
    fn render(&mut self);
    fn render_count(&self) -> usize;
    fn destroy(&mut self);

    fn style(&self) -> StyleBag;
    fn set_style(&mut self, style: StyleBag);

    fn layout(&self) -> ElementLayout;
    fn apply(&mut self, property: &Property);

    fn content(&self) -> Vec<String>;
    fn set_content(&mut self, lines: Vec<String>);

    /// Index of the child painted at (`column`, `row`) in the last frame.
    fn hit_child(&self, column: u16, row: u16) -> Option<usize>;

    /// Non-owning handle for the render surface.
    fn node(&self) -> Node;
}

/// Position and size of an element inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
    pub top: Option<Dimension>,
    pub bottom: Option<Dimension>,
    pub left: Dimension,
    pub width: Dimension,
    pub height: Dimension,
    pub padding: u16,
}

impl Default for ElementLayout {
    fn default() -> Self {
        Self {
            top: None,
            bottom: None,
            left: Dimension::percent(0),
            width: Dimension::percent(100),
            height: Dimension::percent(100),
            padding: 0,
        }
    }
}

impl ElementLayout {
    /// Compute the element's area inside `parent`.
    #[must_use]
    pub fn area(&self, parent: Rect, content_width: u16, content_height: u16) -> Rect {
        let pad = self.padding.saturating_mul(2);
        let width = self.width.resolve(parent.width, content_width.saturating_add(pad));
        let height = self.height.resolve(parent.height, content_height.saturating_add(pad));
        let x = parent.x.saturating_add(self.left.resolve(parent.width, 0));
        let y = match (self.top, self.bottom) {
            (Some(top), _) => parent.y.saturating_add(top.resolve(parent.height, 0)),
            (None, Some(bottom)) => {
                let offset = height.saturating_add(bottom.resolve(parent.height, 0));
                parent.bottom().saturating_sub(offset)
            }
            (None, None) => parent.y,
        };

        Rect::new(x, y, width, height).intersection(parent)
    }
}

#[derive(Debug, Default)]
struct ElementState {
    layout: ElementLayout,
    style: StyleBag,
    content: Vec<String>,
    children: Vec<Element>,
    hidden: bool,
    scrollable: bool,
    renders: usize,
    dirty: bool,
    destroyed: bool,
    painted: Option<Rect>,
}

/// A retained terminal widget.
#[derive(Debug, Default)]
pub struct Element {
    state: Rc<RefCell<ElementState>>,
}

impl Element {
    pub fn new(layout: ElementLayout) -> Self {
        Self {
            state: Rc::new(RefCell::new(ElementState {
                layout,
                ..ElementState::default()
            })),
        }
    }

    #[must_use]
    pub fn with_style(self, style: StyleBag) -> Self {
        self.state.borrow_mut().style = style;
        self
    }

    #[must_use]
    pub fn hidden(self, hidden: bool) -> Self {
        self.state.borrow_mut().hidden = hidden;
        self
    }

    /// Keep the last lines in view when content overflows.
    #[must_use]
    pub fn scrollable(self, scrollable: bool) -> Self {
        self.state.borrow_mut().scrollable = scrollable;
        self
    }

    #[must_use]
    pub fn with_content(self, content: impl Into<String>) -> Self {
        self.state.borrow_mut().content = vec![content.into()];
        self
    }
}

impl Widget for Element {
    fn show(&mut self) {
        self.state.borrow_mut().hidden = false;
    }

    fn hide(&mut self) {
        self.state.borrow_mut().hidden = true;
    }

    fn is_visible(&self) -> bool {
        !self.state.borrow().hidden
    }

    fn append(&mut self, child: Element) {
        self.state.borrow_mut().children.push(child);
    }

    fn remove(&mut self, child: &Node) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.children.len();
        state.children.retain(|existing| !child.points_to(existing));
        state.children.len() != before
    }

    fn clear_children(&mut self) {
        self.state.borrow_mut().children.clear();
    }

    fn child_count(&self) -> usize {
        self.state.borrow().children.len()
    }

    fn render(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.renders += 1;
        state.dirty = true;
    }

    fn render_count(&self) -> usize {
        self.state.borrow().renders
    }

    fn destroy(&mut self) {
        let mut state = self.state.borrow_mut();
        state.destroyed = true;
        state.hidden = true;
        state.children.clear();
        state.content.clear();
    }

    fn style(&self) -> StyleBag {
        self.state.borrow().style
    }

    fn set_style(&mut self, style: StyleBag) {
        self.state.borrow_mut().style = style;
    }

    fn layout(&self) -> ElementLayout {
        self.state.borrow().layout
    }

    fn apply(&mut self, property: &Property) {
        let mut state = self.state.borrow_mut();
        match property {
            Property::Width(value) => state.layout.width = *value,
            Property::Left(value) => state.layout.left = *value,
            Property::Top(value) => state.layout.top = Some(*value),
            Property::Height(value) => state.layout.height = *value,
            Property::Style(value) => state.style = *value,
        }
    }

    fn content(&self) -> Vec<String> {
        self.state.borrow().content.clone()
    }

    fn set_content(&mut self, lines: Vec<String>) {
        self.state.borrow_mut().content = lines;
    }

    fn hit_child(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        let state = self.state.borrow();
        state.painted.filter(|area| area.contains(position))?;
        state.children.iter().position(|child| {
            child
                .state
                .borrow()
                .painted
                .is_some_and(|area| area.contains(position))
        })
    }

    fn node(&self) -> Node {
        Node {
            state: Rc::downgrade(&self.state),
        }
    }
}

/// Weak handle to an [`Element`], held by the render surface.
#[derive(Debug, Clone)]
pub struct Node {
    state: Weak<RefCell<ElementState>>,
}

impl Node {
    /// Whether the element still exists and has not been destroyed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state.upgrade().is_some_and(|state| !state.borrow().destroyed)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Node) -> bool {
        self.state.ptr_eq(&other.state)
    }

    fn points_to(&self, element: &Element) -> bool {
        std::ptr::eq(self.state.as_ptr(), Rc::as_ptr(&element.state))
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.state.upgrade().is_some_and(|state| state.borrow().dirty)
    }

    /// Draw the element and its children inside `parent`.
    pub(crate) fn paint(&self, frame: &mut Frame, parent: Rect, hover: Option<Position>) {
        if let Some(state) = self.state.upgrade() {
            paint_state(&state, frame, parent, hover);
        }
    }
}

fn paint_state(state: &RefCell<ElementState>, frame: &mut Frame, parent: Rect, hover: Option<Position>) {
    let mut state = state.borrow_mut();
    state.dirty = false;
    state.painted = None;
    if state.hidden || state.destroyed {
        return;
    }

    let content_width = state
        .content
        .iter()
        .map(|line| markup::strip_tags(line).chars().count())
        .max()
        .unwrap_or(0)
        .min(usize::from(u16::MAX)) as u16;
    let content_height = state.content.len().min(usize::from(u16::MAX)) as u16;
    let area = state.layout.area(parent, content_width, content_height);
    if area.is_empty() {
        return;
    }
    state.painted = Some(area);

    let hovered = hover.is_some_and(|position| area.contains(position));
    let style = state.style.to_style(hovered);
    let block = Block::default().padding(Padding::uniform(state.layout.padding)).style(style);
    let inner = block.inner(area);

    let lines: Vec<Line> = state.content.iter().map(|line| markup::parse_line(line, style)).collect();
    let scroll = if state.scrollable {
        content_height.saturating_sub(inner.height)
    } else {
        0
    };

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);

    for child in &state.children {
        child.node().paint(frame, inner, hover);
    }
}
