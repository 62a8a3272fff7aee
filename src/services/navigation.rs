//! Host navigation history capability
//!
//! The coordinator only ever pushes entries, replaces the current entry,
//! and listens for back/forward signals. It never reads history back.
//! Hosts without a navigation history use [`NullHistory`].

use crate::model::HistoryPayload;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked when the host delivers a back/forward navigation signal
pub type BackListener = Rc<dyn Fn(&HistoryPayload)>;

/// Handle for a registered back listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Push/replace/pop-signal API of a host navigation history
///
/// All operations are fire-and-forget: failures are the provider's concern
/// and never reach the caller.
pub trait NavigationHistory {
    /// Whether a real navigation environment backs this provider
    fn is_available(&self) -> bool {
        true
    }

    /// Add one entry carrying `payload` without changing the location
    fn push_entry(&self, payload: HistoryPayload);

    /// Overwrite the payload of the current entry in place
    fn replace_current(&self, payload: HistoryPayload);

    /// Register a back/forward signal listener
    ///
    /// Returns `None` when the provider has no signal source.
    fn listen_back(&self, listener: BackListener) -> Option<ListenerId>;

    /// Remove a listener registered with `listen_back`
    fn unlisten_back(&self, id: ListenerId);
}

/// Provider for contexts without navigation history (headless, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHistory;

impl NavigationHistory for NullHistory {
    fn is_available(&self) -> bool {
        false
    }

    fn push_entry(&self, _payload: HistoryPayload) {}

    fn replace_current(&self, _payload: HistoryPayload) {}

    fn listen_back(&self, _listener: BackListener) -> Option<ListenerId> {
        None
    }

    fn unlisten_back(&self, _id: ListenerId) {}
}

struct SessionState {
    entries: Vec<HistoryPayload>,
    cursor: usize,
    listeners: Vec<(ListenerId, BackListener)>,
    next_listener: u64,
}

/// In-memory session history
///
/// Behaves like a browser tab's history: an entry list with a cursor.
/// Pushing drops every entry ahead of the cursor. Moving the cursor with
/// [`back`](SessionHistory::back) or [`forward`](SessionHistory::forward)
/// delivers the new current payload to every listener.
pub struct SessionHistory {
    state: RefCell<SessionState>,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHistory {
    /// Start with a single empty entry for the page itself
    pub fn new() -> Self {
        Self {
            state: RefCell::new(SessionState {
                entries: vec![HistoryPayload::empty()],
                cursor: 0,
                listeners: Vec::new(),
                next_listener: 0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.state.borrow().cursor
    }

    pub fn entries(&self) -> Vec<HistoryPayload> {
        self.state.borrow().entries.clone()
    }

    pub fn current(&self) -> HistoryPayload {
        let state = self.state.borrow();
        state.entries[state.cursor].clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.borrow().cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let state = self.state.borrow();
        state.cursor + 1 < state.entries.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Step back one entry and signal listeners
    ///
    /// Returns `false` (and signals nothing) at the first entry.
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Step forward one entry and signal listeners
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    fn traverse(&self, delta: isize) -> bool {
        let (payload, listeners) = {
            let mut state = self.state.borrow_mut();
            let Some(target) = state.cursor.checked_add_signed(delta) else {
                return false;
            };
            if target >= state.entries.len() {
                return false;
            }
            state.cursor = target;
            let listeners: Vec<BackListener> = state
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            (state.entries[target].clone(), listeners)
        };

        tracing::trace!(delta, label = payload.label(), "session history traversal");
        for listener in listeners {
            listener(&payload);
        }
        true
    }
}

impl NavigationHistory for SessionHistory {
    fn push_entry(&self, payload: HistoryPayload) {
        let mut state = self.state.borrow_mut();
        let keep = state.cursor + 1;
        state.entries.truncate(keep);
        state.entries.push(payload);
        state.cursor = keep;
    }

    fn replace_current(&self, payload: HistoryPayload) {
        let mut state = self.state.borrow_mut();
        let cursor = state.cursor;
        state.entries[cursor] = payload;
    }

    fn listen_back(&self, listener: BackListener) -> Option<ListenerId> {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.listeners.push((id, listener));
        Some(id)
    }

    fn unlisten_back(&self, id: ListenerId) {
        self.state
            .borrow_mut()
            .listeners
            .retain(|(lid, _)| *lid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModalData;
    use std::cell::RefCell;

    fn entry(id: &str) -> HistoryPayload {
        HistoryPayload::modal(id, ModalData::new())
    }

    fn labels(history: &SessionHistory) -> Vec<String> {
        history
            .entries()
            .iter()
            .map(|p| p.label().to_string())
            .collect()
    }

    #[test]
    fn test_push_appends_and_moves_cursor() {
        let history = SessionHistory::new();
        history.push_entry(entry("a"));
        history.push_entry(entry("b"));

        assert_eq!(labels(&history), vec!["(empty)", "a", "b"]);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current(), entry("b"));
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let history = SessionHistory::new();
        history.push_entry(entry("a"));
        history.push_entry(entry("b"));
        assert!(history.back());
        assert!(history.can_go_forward());

        history.push_entry(entry("c"));
        assert_eq!(labels(&history), vec!["(empty)", "a", "c"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_replace_current_keeps_length() {
        let history = SessionHistory::new();
        history.push_entry(entry("a"));
        history.replace_current(HistoryPayload::empty());

        assert_eq!(history.len(), 2);
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_back_signals_listeners_with_new_current() {
        let history = Rc::new(SessionHistory::new());
        history.push_entry(entry("a"));
        history.push_entry(entry("b"));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = {
            let seen = Rc::clone(&seen);
            history
                .listen_back(Rc::new(move |p: &HistoryPayload| {
                    seen.borrow_mut().push(p.label().to_string())
                }))
                .unwrap()
        };

        assert!(history.back());
        assert!(history.forward());
        assert!(!history.forward());
        assert_eq!(*seen.borrow(), vec!["a", "b"]);

        history.unlisten_back(id);
        assert_eq!(history.listener_count(), 0);
        assert!(history.back());
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_back_at_first_entry_is_silent() {
        let history = SessionHistory::new();
        let fired = Rc::new(RefCell::new(false));
        let _id = {
            let fired = Rc::clone(&fired);
            history.listen_back(Rc::new(move |_: &HistoryPayload| *fired.borrow_mut() = true))
        };

        assert!(!history.back());
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_listener_may_call_back_into_history() {
        let history = Rc::new(SessionHistory::new());
        history.push_entry(entry("a"));

        let weak = Rc::downgrade(&history);
        history.listen_back(Rc::new(move |_: &HistoryPayload| {
            if let Some(history) = weak.upgrade() {
                history.replace_current(HistoryPayload::empty());
            }
        }));

        history.push_entry(entry("b"));
        assert!(history.back());
        assert_eq!(labels(&history), vec!["(empty)", "(empty)", "b"]);
    }

    #[test]
    fn test_null_history_is_inert() {
        let history = NullHistory;
        assert!(!history.is_available());
        history.push_entry(entry("a"));
        history.replace_current(HistoryPayload::empty());
        assert!(history.listen_back(Rc::new(|_: &HistoryPayload| {})).is_none());
    }
}
