//! Utility modules for the Chatdeck application.
//!
//! - [`color`] - Theme color parsing into terminal colors
//! - [`markup`] - `{bold}` inline markup for content lines

pub mod color;
pub mod markup;
