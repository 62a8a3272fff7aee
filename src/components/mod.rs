//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod modal_dialog;
pub mod quit_dialog;

pub use help_dialog::HelpDialog;
pub use home::{HomeComponent, NotificationLog};
pub use layout::{calculate_main_layout, centered_popup, stacked_popup};
pub use modal_dialog::ModalDialog;
pub use quit_dialog::QuitDialog;
