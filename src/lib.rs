//! Chatdeck - a terminal chat dashboard
//!
//! This library provides a small component framework for terminal user
//! interfaces built on Ratatui, and the chat dashboard assembled from it: a
//! toggleable channel list, a notification header, a scrolling message log and
//! an input line.
//!
//! # Modules
//!
//! * [`app`] - Application state and input routing
//! * [`config`] - Application configuration management
//! * [`theme`] - Per-component color themes
//! * [`ui`] - The atom framework, components and the terminal loop
//! * [`utils`] - Utility functions and helpers

/// Application state: keys, commands and chat client events
pub mod app;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging to a file for debugging and error tracking
pub mod logger;

/// Color themes loaded from JSON
pub mod theme;

/// Terminal user interface framework, components and rendering
pub mod ui;

/// Utility functions for colors and inline markup
pub mod utils;

pub use app::{App, ClientEvent};
pub use config::Config;
