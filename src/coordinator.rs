//! Modal stack coordinator
//!
//! Keeps the open-modal stack in step with the host navigation history:
//!
//! ```text
//! open_modal(A)   push {modalId: A, data}   stack [.., A]
//! close_modal(A)  replace current with {}   stack without every A
//! back signal     replace current with {}   stack without its top
//! ```
//!
//! # Invariants
//!
//! - Stack length never exceeds the number of synthetic entries pushed and
//!   not yet consumed by a close or a back signal.
//! - A back signal removes exactly the topmost modal, whatever payload the
//!   signal carried. An empty stack stays empty.
//! - `close_modal` removes every entry with the id, not just one.
//! - Every stack change is published as a new `ModalStack` instance.
//! - A handle outlives its coordinator only as a tombstone: every operation
//!   on it panics with [`ModalError::Disposed`].
//!
//! # Known gap
//!
//! Closing a modal that is not on top still replaces the *current* history
//! entry, which belongs to another modal. A later back signal then consumes
//! an already-empty entry and pops whatever is on top.

use crate::error::ModalError;
use crate::model::{ActiveModal, HistoryPayload, ModalRequest, ModalStack};
use crate::observable::{Observable, Subscription};
use crate::services::{BackListener, ListenerId, NavigationHistory, NullHistory};
use std::cell::Cell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// State shared between a coordinator, its handles and its back listener
pub(crate) struct CoordinatorState {
    stack: Observable<ModalStack>,
    history: Rc<dyn NavigationHistory>,
    listener: Cell<Option<ListenerId>>,
    disposed: Cell<bool>,
}

impl CoordinatorState {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// History side effects are skipped once the coordinator is torn down
    fn history(&self) -> Option<&dyn NavigationHistory> {
        if self.disposed.get() || !self.history.is_available() {
            None
        } else {
            Some(self.history.as_ref())
        }
    }

    fn open_modal(&self, request: ModalRequest) {
        let modal = request.into_modal();
        let modal_id = modal.id.clone();

        if let Some(history) = self.history() {
            tracing::trace!(%modal_id, "push history entry");
            history.push_entry(HistoryPayload::modal(modal_id.clone(), modal.data.clone()));
        }

        let stack = self.stack.with(|stack| stack.pushed(modal));
        tracing::debug!(%modal_id, depth = stack.len(), "modal opened");
        self.stack.set(stack);
    }

    fn close_modal(&self, modal_id: &str) {
        let (before, stack) = self.stack.with(|stack| (stack.len(), stack.without(modal_id)));
        let removed = before - stack.len();

        if removed > 0 {
            tracing::debug!(modal_id, removed, depth = stack.len(), "modal closed");
            self.stack.set(stack);
        } else {
            tracing::debug!(modal_id, "close requested for a modal that is not open");
        }

        if let Some(history) = self.history() {
            tracing::trace!(modal_id, "replace current history entry");
            history.replace_current(HistoryPayload::empty());
        }
    }

    fn navigate_back(&self) {
        let (stack, top) = self.stack.with(|stack| stack.popped());

        match top {
            Some(top) => {
                tracing::debug!(modal_id = %top.id, depth = stack.len(), "modal closed by back navigation");
                self.stack.set(stack);
            }
            None => tracing::debug!("back navigation with no open modal"),
        }

        if let Some(history) = self.history() {
            history.replace_current(HistoryPayload::empty());
        }
    }
}

/// Shared access to a coordinator's operations
///
/// Handles are cheap to clone and are what consumers receive, either
/// directly from [`ModalCoordinator::handle`] or through a
/// [`ModalContext`](crate::ModalContext).
#[derive(Clone)]
pub struct ModalHandle {
    state: Rc<CoordinatorState>,
}

impl ModalHandle {
    pub(crate) fn from_state(state: Rc<CoordinatorState>) -> Self {
        Self { state }
    }

    fn live(&self) -> &CoordinatorState {
        if self.state.is_disposed() {
            panic!("{}", ModalError::Disposed);
        }
        &self.state
    }

    /// Push a history entry for the modal, then put it on top of the stack
    ///
    /// Duplicate ids are allowed; each open gets its own entry.
    ///
    /// # Panics
    ///
    /// If the coordinator was disposed, as do all other operations on a
    /// handle except [`is_disposed`](Self::is_disposed).
    pub fn open_modal(&self, request: impl Into<ModalRequest>) {
        self.live().open_modal(request.into());
    }

    /// Remove every open modal with `modal_id`
    ///
    /// The current history entry is emptied even if nothing matched.
    pub fn close_modal(&self, modal_id: &str) {
        self.live().close_modal(modal_id);
    }

    /// First open modal with `modal_id`
    pub fn open_modal_checker(&self, modal_id: &str) -> Option<ActiveModal> {
        self.live().stack.with(|stack| stack.find(modal_id).cloned())
    }

    /// Current stack snapshot
    pub fn active_modals(&self) -> ModalStack {
        self.live().stack.get()
    }

    pub fn depth(&self) -> usize {
        self.live().stack.with(ModalStack::len)
    }

    /// Get notified with every new stack
    pub fn subscribe(&self, callback: impl Fn(&ModalStack) + 'static) -> Subscription {
        self.live().stack.subscribe(callback)
    }

    /// Handle a back/forward signal: pop the topmost modal
    ///
    /// Called by the registered history listener. Hosts that route
    /// navigation signals themselves can call it directly. The payload is
    /// ignored.
    pub fn navigate_back(&self, _payload: &HistoryPayload) {
        self.live().navigate_back();
    }

    pub fn is_disposed(&self) -> bool {
        self.state.is_disposed()
    }
}

impl fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHandle")
            .field("active_modals", &self.state.stack.get().ids())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Owner of a modal stack and its history listener
///
/// Created with [`new`](ModalCoordinator::new) and torn down with
/// [`dispose`](ModalCoordinator::dispose) or by dropping it. Derefs to
/// [`ModalHandle`] for the operations.
pub struct ModalCoordinator {
    handle: ModalHandle,
}

impl ModalCoordinator {
    /// Create a coordinator over `history` and start listening for back
    /// signals
    pub fn new(history: Rc<dyn NavigationHistory>) -> Self {
        let coordinator = Self {
            handle: ModalHandle::from_state(Rc::new(CoordinatorState {
                stack: Observable::new(ModalStack::new()),
                history,
                listener: Cell::new(None),
                disposed: Cell::new(false),
            })),
        };
        coordinator.attach();
        coordinator
    }

    /// Coordinator without navigation history
    pub fn headless() -> Self {
        Self::new(Rc::new(NullHistory))
    }

    /// Register the back listener; does nothing if already registered
    fn attach(&self) {
        let state = &self.handle.state;
        if state.listener.get().is_some() || state.is_disposed() {
            return;
        }

        let weak = Rc::downgrade(state);
        let listener: BackListener = Rc::new(move |_payload: &HistoryPayload| {
            if let Some(state) = weak.upgrade() {
                state.navigate_back();
            }
        });

        let id = state.history.listen_back(listener);
        if id.is_some() {
            tracing::debug!("back navigation listener registered");
        }
        state.listener.set(id);
    }

    /// A new handle to this coordinator
    pub fn handle(&self) -> ModalHandle {
        self.handle.clone()
    }

    pub(crate) fn state(&self) -> &Rc<CoordinatorState> {
        &self.handle.state
    }

    /// Tear down: deregister the back listener and stop touching history
    pub fn dispose(self) {
        // Drop does the work
    }

    fn teardown(&self) {
        let state = &self.handle.state;
        if state.disposed.replace(true) {
            return;
        }
        if let Some(id) = state.listener.take() {
            state.history.unlisten_back(id);
            tracing::debug!("back navigation listener removed");
        }
    }
}

impl Deref for ModalCoordinator {
    type Target = ModalHandle;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl fmt::Debug for ModalCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalCoordinator")
            .field("active_modals", &self.handle.state.stack.get().ids())
            .field("history_available", &self.handle.state.history.is_available())
            .finish()
    }
}

impl Drop for ModalCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}
