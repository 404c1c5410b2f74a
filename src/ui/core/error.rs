//! Error types raised by the atom framework.

use std::fmt;

/// Lifecycle position of an atom.
///
/// Transitions only move forward: `Unattached -> Attached -> Initialized -> Destroyed`.
/// `Destroyed` is terminal and may be reached from any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unattached,
    Attached,
    Initialized,
    Destroyed,
}

impl Lifecycle {
    /// Whether the atom is attached to a manager and still alive.
    #[must_use]
    pub fn is_attached(self) -> bool {
        matches!(self, Lifecycle::Attached | Lifecycle::Initialized)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Unattached => "unattached",
            Lifecycle::Attached => "attached",
            Lifecycle::Initialized => "initialized",
            Lifecycle::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// Errors produced by atoms, blueprints and the UI manager.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// The blueprint set does not satisfy the required contract. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation was attempted in a lifecycle state that does not allow it.
    #[error("Invalid state: cannot {operation} atom '{atom}' while {state}")]
    InvalidState {
        atom: &'static str,
        state: Lifecycle,
        operation: &'static str,
    },

    /// Input rejected before anything was changed.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Terminal setup or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl UiError {
    pub fn invalid_state(atom: &'static str, state: Lifecycle, operation: &'static str) -> Self {
        UiError::InvalidState { atom, state, operation }
    }

    /// Whether this error is an [`UiError::InvalidState`].
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, UiError::InvalidState { .. })
    }
}
