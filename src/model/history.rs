//! Payloads attached to navigation history entries

use super::modal::ModalData;
use serde::{Deserialize, Serialize};

/// Application payload carried by a history entry
///
/// Serializes as `{ "modalId": "...", "data": { ... } }` for entries pushed
/// by `open_modal`, and as `{}` for entries that were consumed by a close or
/// a back navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPayload {
    #[serde(rename = "modalId", default, skip_serializing_if = "Option::is_none")]
    pub modal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ModalData>,
}

impl HistoryPayload {
    /// The empty payload used to consume an entry
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn modal(modal_id: impl Into<String>, data: ModalData) -> Self {
        Self {
            modal_id: Some(modal_id.into()),
            data: Some(data),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modal_id.is_none() && self.data.is_none()
    }

    /// Short label for display
    pub fn label(&self) -> &str {
        self.modal_id.as_deref().unwrap_or("(empty)")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_payload_is_empty_object() {
        let payload = HistoryPayload::empty();
        assert!(payload.is_empty());
        assert_eq!(payload.to_json().unwrap(), "{}");
        assert_eq!(payload.label(), "(empty)");
    }

    #[test]
    fn test_modal_payload_shape() {
        let mut data = ModalData::new();
        data.insert("x".into(), json!(1));
        let payload = HistoryPayload::modal("A", data);

        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({ "modalId": "A", "data": { "x": 1 } }));
        assert_eq!(payload.label(), "A");
    }

    #[test]
    fn test_foreign_state_parses_leniently() {
        let payload = HistoryPayload::from_json(r#"{"scrollY": 120}"#).unwrap();
        assert!(payload.is_empty());
    }
}
