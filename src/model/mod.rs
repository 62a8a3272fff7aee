//! Model layer - plain data shared by the coordinator and its collaborators
//!
//! - `ActiveModal` / `ModalStack` - the open modals, bottom to top
//! - `ModalRequest` - parameters for opening a modal
//! - `HistoryPayload` - what gets stored in a navigation history entry

pub mod history;
pub mod modal;

pub use history::HistoryPayload;
pub use modal::{ActiveModal, ModalData, ModalRequest, ModalStack};
