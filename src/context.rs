//! Injected access to a coordinator
//!
//! Components receive a `ModalContext` instead of reaching for global state.
//! Asking an unbound or torn-down context for a handle is a programming
//! error: [`ModalContext::handle`] panics, [`ModalContext::try_handle`]
//! reports it.

use crate::coordinator::{CoordinatorState, ModalCoordinator, ModalHandle};
use crate::error::ModalError;
use std::rc::Weak;

/// Access path from a consumer to its coordinator
///
/// `Default` is the unbound path.
#[derive(Clone, Default)]
pub struct ModalContext {
    state: Option<Weak<CoordinatorState>>,
}

impl ModalContext {
    /// Bind a context to `coordinator`
    ///
    /// The context does not keep the coordinator alive.
    pub fn provide(coordinator: &ModalCoordinator) -> Self {
        Self {
            state: Some(std::rc::Rc::downgrade(coordinator.state())),
        }
    }

    pub fn is_provided(&self) -> bool {
        self.state.is_some()
    }

    pub fn try_handle(&self) -> Result<ModalHandle, ModalError> {
        let weak = self.state.as_ref().ok_or(ModalError::NotProvided)?;
        let state = weak.upgrade().ok_or(ModalError::Disposed)?;
        if state.is_disposed() {
            return Err(ModalError::Disposed);
        }
        Ok(ModalHandle::from_state(state))
    }

    /// Handle to the bound coordinator
    ///
    /// # Panics
    ///
    /// If the context was never provided or its coordinator was disposed.
    pub fn handle(&self) -> ModalHandle {
        match self.try_handle() {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }
}

impl std::fmt::Debug for ModalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalContext")
            .field("provided", &self.is_provided())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_context_reports_not_provided() {
        let context = ModalContext::default();
        assert!(!context.is_provided());
        assert!(matches!(context.try_handle(), Err(ModalError::NotProvided)));
    }

    #[test]
    #[should_panic(expected = "outside of any ModalCoordinator")]
    fn test_unbound_context_fails_fast() {
        let context = ModalContext::default();
        let _ = context.handle();
    }

    #[test]
    fn test_bound_context_shares_the_stack() {
        let coordinator = ModalCoordinator::headless();
        let context = ModalContext::provide(&coordinator);

        context.handle().open_modal("A");
        assert_eq!(coordinator.active_modals().ids(), vec!["A"]);
        assert!(context.handle().open_modal_checker("A").is_some());
    }

    #[test]
    fn test_disposed_coordinator_is_reported() {
        let coordinator = ModalCoordinator::headless();
        let context = ModalContext::provide(&coordinator);
        coordinator.dispose();

        assert!(matches!(context.try_handle(), Err(ModalError::Disposed)));
    }

    #[test]
    fn test_disposed_while_handle_alive_is_reported() {
        let coordinator = ModalCoordinator::headless();
        let context = ModalContext::provide(&coordinator);
        let _held = coordinator.handle();
        coordinator.dispose();

        assert!(matches!(context.try_handle(), Err(ModalError::Disposed)));
    }
}
