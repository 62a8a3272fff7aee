//! history-modals - a modal stack kept in sync with navigation history
//!
//! Opening a modal pushes a synthetic history entry, so the host's back
//! navigation closes the topmost modal instead of leaving the page.
//!
//! The crate is split the same way the rest of the app is:
//! - `model` - plain data (`ActiveModal`, `ModalStack`, `HistoryPayload`)
//! - `services` - the host navigation history capability and its backends
//! - `coordinator` - the stack/history synchronization protocol
//! - `context` - injected access to a coordinator for consumers
//! - `observable` - change notification for rendering code

pub mod context;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod observable;
pub mod services;

pub use context::ModalContext;
pub use coordinator::{ModalCoordinator, ModalHandle};
pub use error::ModalError;
pub use model::{ActiveModal, HistoryPayload, ModalData, ModalRequest, ModalStack};
pub use observable::{Observable, Subscription};
pub use services::{default_history, NavigationHistory, NullHistory, SessionHistory};
