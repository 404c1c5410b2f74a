//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

use std::ops::RangeInclusive;

// Configuration defaults
pub const DEFAULT_TITLE: &str = "Chatdeck";
pub const DEFAULT_COMMAND_PREFIX: &str = "/";
pub const DEFAULT_MAX_MESSAGES: usize = 50;
pub const DEFAULT_HEADER_AUTO_HIDE_PER_CHAR_MS: u64 = 100;
pub const DEFAULT_MESSAGE_FORMAT: &str = "{sender}: {message}";
pub const DEFAULT_TICK_RATE_MS: u64 = 100;
pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_THEMES_DIR: &str = "themes";

// Configuration limits
pub const MAX_MESSAGES_LIMIT: usize = 10_000;
pub const MAX_HEADER_AUTO_HIDE_PER_CHAR_MS: u64 = 10_000;
pub const TICK_RATE_RANGE_MS: RangeInclusive<u64> = 10..=1000;

// Channel list
pub const CHANNEL_NAME_MAX_LEN: usize = 25;
pub const CHANNEL_NAME_KEEP_LEN: usize = 21;
pub const CHANNEL_NAME_ELLIPSIS: &str = " ...";

// Theme component keys
pub const THEME_CHANNELS: &str = "channels";
pub const THEME_INPUT: &str = "input";
pub const THEME_HEADER: &str = "header";
pub const THEME_MESSAGES: &str = "messages";

// Senders
pub const SENDER_SYSTEM: &str = "System";

// System messages
pub const MSG_CONNECTED: &str = "Successfully connected as";
pub const MSG_NO_ACTIVE_CHANNEL: &str = "No active text channel";
pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MSG_CLIENT_ERROR: &str = "An error occurred within the client";
pub const MSG_THEME_APPLIED: &str = "Applied theme";
pub const MSG_THEME_FAILED: &str = "Could not load theme";
pub const MSG_PINNED: &str = "Pinned";
pub const MSG_UNPINNED: &str = "Unpinned";
pub const MSG_WELCOME: &str = "Welcome! Type {bold}/help{/bold} for commands, {bold}TAB{/bold} toggles the channel list";
pub const TIP_STARTUP: &str = "{bold}Pro Tip.{/bold} Press {bold}ESC{/bold} anytime to clear the current input";

// Status messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
