//! UI module for Chatdeck
//!
//! This module holds the atom framework, the concrete components and the
//! terminal event loop.

pub mod components;
pub mod core;
pub mod renderer;

pub use renderer::{draw, run_app};
