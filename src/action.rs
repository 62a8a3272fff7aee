//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to key events, and the App turns
//! them into coordinator calls or host navigation signals.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open a new modal with the next generated id
    OpenModal,
    /// Open another modal with the same id and data as the top one
    OpenDuplicate,
    /// Close every modal with this id
    CloseModal(String),
    /// Close every modal sharing the top modal's id
    CloseTopModal,
    /// Toggle the help modal
    OpenHelp,
    /// Open the quit confirmation modal
    OpenQuitDialog,

    // ─────────────────────────────────────────────────────────────────────────
    // Host Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Step the session history back (the browser back button)
    NavigateBack,
    /// Step the session history forward
    NavigateForward,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the active panel up one line
    ScrollUp,
    /// Scroll the active panel down one line
    ScrollDown,
    /// Clear the notification log
    ClearLog,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenModal => write!(f, "OpenModal"),
            Action::OpenDuplicate => write!(f, "OpenDuplicate"),
            Action::CloseModal(id) => write!(f, "CloseModal({})", id),
            Action::CloseTopModal => write!(f, "CloseTopModal"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::NavigateBack => write!(f, "NavigateBack"),
            Action::NavigateForward => write!(f, "NavigateForward"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::ClearLog => write!(f, "ClearLog"),
        }
    }
}
