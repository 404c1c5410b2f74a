//! The render surface owned by the UI manager.

use ratatui::layout::Position;
use ratatui::Frame;

use super::widget::Node;

/// Kind of redraw the surface is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Draw changed content on the existing geometry.
    Incremental,
    /// Clear the terminal and recompute all geometry. Expensive.
    Full,
}

/// Root of the widget tree. Only the [`UiManager`](super::manager::UiManager) touches it.
pub trait Surface {
    fn append(&mut self, node: Node);
    fn remove(&mut self, node: &Node) -> bool;
    /// Number of live nodes.
    fn node_count(&self) -> usize;

    /// Queue an incremental redraw.
    fn render(&mut self);
    /// Queue a full redraw with geometry reallocation.
    fn realloc(&mut self);
    /// Consume the pending redraw request, if any.
    fn take_redraw(&mut self) -> Option<Redraw>;

    fn set_title(&mut self, title: &str);
    fn title(&self) -> &str;
    /// The title, if it changed since the last call.
    fn take_title(&mut self) -> Option<String>;

    /// Track the mouse position for hover styles.
    fn hover(&mut self, column: u16, row: u16);
    fn paint(&mut self, frame: &mut Frame);
}

/// Terminal screen backed by ratatui.
#[derive(Debug, Default)]
pub struct Screen {
    nodes: Vec<Node>,
    title: String,
    title_changed: bool,
    pending: Option<Redraw>,
    hover: Option<Position>,
}

impl Screen {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_changed: true,
            ..Self::default()
        }
    }

    fn prune(&mut self) {
        self.nodes.retain(Node::is_alive);
    }

    fn request(&mut self, redraw: Redraw) {
        if self.pending != Some(Redraw::Full) {
            self.pending = Some(redraw);
        }
    }
}

impl Surface for Screen {
    fn append(&mut self, node: Node) {
        if self.nodes.iter().any(|existing| existing.ptr_eq(&node)) {
            return;
        }
        self.nodes.push(node);
    }

    fn remove(&mut self, node: &Node) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|existing| !existing.ptr_eq(node));
        self.nodes.len() != before
    }

    fn node_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_alive()).count()
    }

    fn render(&mut self) {
        self.request(Redraw::Incremental);
    }

    fn realloc(&mut self) {
        self.request(Redraw::Full);
    }

    fn take_redraw(&mut self) -> Option<Redraw> {
        self.prune();
        let pending = self.pending.take();
        if pending.is_none() && self.nodes.iter().any(Node::is_dirty) {
            return Some(Redraw::Incremental);
        }
        pending
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.title_changed = true;
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn take_title(&mut self) -> Option<String> {
        std::mem::take(&mut self.title_changed).then(|| self.title.clone())
    }

    fn hover(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);
        if self.hover != Some(position) {
            self.hover = Some(position);
            self.request(Redraw::Incremental);
        }
    }

    fn paint(&mut self, frame: &mut Frame) {
        self.prune();
        let area = frame.area();
        for node in &self.nodes {
            node.paint(frame, area, self.hover);
        }
    }
}
