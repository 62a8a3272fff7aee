//! Modal stack for tracking open overlays
//!
//! `ModalStack` is an immutable snapshot. Every mutation builds a new
//! container instance, so consumers can detect changes with `ptr_eq`
//! instead of comparing contents.

use crate::error::ModalError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::rc::Rc;

/// Arbitrary data attached to an open modal
pub type ModalData = Map<String, Value>;

/// One open modal instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveModal {
    pub id: String,
    /// Extra keys passed to `open_modal`; empty when none were given
    #[serde(default)]
    pub data: ModalData,
}

impl ActiveModal {
    pub fn new(id: impl Into<String>, data: ModalData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Look up a single data value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Parameters for opening a modal
///
/// On the wire this is a flat object: `{ "modalId": "confirm", "x": 1 }`.
/// Every key other than `modalId` ends up in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalRequest {
    #[serde(rename = "modalId")]
    pub modal_id: String,
    #[serde(flatten)]
    pub data: ModalData,
}

impl ModalRequest {
    pub fn new(modal_id: impl Into<String>) -> Self {
        Self {
            modal_id: modal_id.into(),
            data: ModalData::new(),
        }
    }

    /// Attach a data value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Parse a flat JSON request object
    pub fn from_json(value: Value) -> Result<Self, ModalError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn into_modal(self) -> ActiveModal {
        ActiveModal::new(self.modal_id, self.data)
    }
}

impl From<&str> for ModalRequest {
    fn from(modal_id: &str) -> Self {
        Self::new(modal_id)
    }
}

impl From<String> for ModalRequest {
    fn from(modal_id: String) -> Self {
        Self::new(modal_id)
    }
}

/// Ordered snapshot of open modals
///
/// Insertion order is open order and visual stacking order: the last entry
/// is the topmost, most recently opened modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalStack {
    entries: Rc<Vec<ActiveModal>>,
}

impl ModalStack {
    /// Create a new empty modal stack
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The topmost modal
    pub fn top(&self) -> Option<&ActiveModal> {
        self.entries.last()
    }

    /// First modal with the given id
    pub fn find(&self, modal_id: &str) -> Option<&ActiveModal> {
        self.entries.iter().find(|modal| modal.id == modal_id)
    }

    pub fn contains(&self, modal_id: &str) -> bool {
        self.find(modal_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActiveModal> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|modal| modal.id.as_str()).collect()
    }

    /// New stack with `modal` on top
    pub fn pushed(&self, modal: ActiveModal) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(modal);
        Self {
            entries: Rc::new(entries),
        }
    }

    /// New stack with every entry matching `modal_id` filtered out
    pub fn without(&self, modal_id: &str) -> Self {
        Self {
            entries: Rc::new(
                self.entries
                    .iter()
                    .filter(|modal| modal.id != modal_id)
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// New stack with the top entry removed, plus the removed entry
    ///
    /// An empty stack yields an empty stack and `None`.
    pub fn popped(&self) -> (Self, Option<ActiveModal>) {
        let mut entries = self.entries.as_ref().clone();
        let top = entries.pop();
        (
            Self {
                entries: Rc::new(entries),
            },
            top,
        )
    }

    /// Whether both snapshots are the same container instance
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.entries, &b.entries)
    }
}

impl<'a> IntoIterator for &'a ModalStack {
    type Item = &'a ActiveModal;
    type IntoIter = std::slice::Iter<'a, ActiveModal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
