//! Device twin update documents
//!
//! Every optional field is skipped when `None`, so a plain actual-value
//! update serializes to exactly:
//!
//! ```text
//! { "event_id": "...", "timestamp": 1700000000000,
//!   "twin": { "red": { "actual": { "value": "ON" }, "metadata": { "type": "Updated" } } } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata type tag for an actual-value update
pub const UPDATED: &str = "Updated";

/// Fields shared by every event message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseMessage {
    pub event_id: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwinValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ValueMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwinVersion {
    pub cloud: i64,
    pub edge: i64,
}

/// Twin record of a single property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTwin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<TwinValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<TwinValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TypeMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<TwinVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_version: Option<TwinVersion>,
}

impl MsgTwin {
    /// Record carrying a freshly observed actual value
    pub fn actual_update(value: impl Into<String>) -> Self {
        Self {
            actual: Some(TwinValue {
                value: Some(value.into()),
                metadata: None,
            }),
            metadata: Some(TypeMetadata {
                kind: Some(UPDATED.to_string()),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTwinUpdate {
    #[serde(flatten)]
    pub base: BaseMessage,
    pub twin: BTreeMap<String, MsgTwin>,
}

impl DeviceTwinUpdate {
    /// Update reporting one property's new actual value
    pub fn actual(base: BaseMessage, property: &str, value: &str) -> Self {
        let mut twin = BTreeMap::new();
        twin.insert(property.to_string(), MsgTwin::actual_update(value));
        Self { base, twin }
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn base() -> BaseMessage {
        BaseMessage {
            event_id: "4b1c6f1e-0000-4000-8000-000000000001".to_string(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_actual_update_wire_format() {
        let update = DeviceTwinUpdate::actual(base(), "yellow", "OFF");
        let payload = update.to_payload().unwrap();
        let value: Value = serde_json::from_slice(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "event_id": "4b1c6f1e-0000-4000-8000-000000000001",
                "timestamp": 1_700_000_000_000i64,
                "twin": {
                    "yellow": {
                        "actual": { "value": "OFF" },
                        "metadata": { "type": "Updated" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let update = DeviceTwinUpdate::actual(base(), "green", "ON");
        let text = String::from_utf8(update.to_payload().unwrap()).unwrap();

        assert!(!text.contains("null"));
        assert!(!text.contains("expected"));
        assert!(!text.contains("optional"));
        assert!(!text.contains("version"));
    }

    #[test]
    fn test_full_record_parses() {
        let raw = r#"{
            "event_id": "e",
            "timestamp": 5,
            "twin": {
                "red": {
                    "expected": { "value": "ON", "metadata": { "timestamp": 4 } },
                    "optional": false,
                    "expected_version": { "cloud": 2, "edge": 1 }
                }
            }
        }"#;
        let update: DeviceTwinUpdate = serde_json::from_str(raw).unwrap();
        let red = &update.twin["red"];

        assert_eq!(update.base.timestamp, 5);
        assert_eq!(red.expected.as_ref().unwrap().value.as_deref(), Some("ON"));
        assert_eq!(
            red.expected.as_ref().unwrap().metadata,
            Some(ValueMetadata { timestamp: Some(4) })
        );
        assert_eq!(red.optional, Some(false));
        assert_eq!(
            red.expected_version,
            Some(TwinVersion { cloud: 2, edge: 1 })
        );
        assert!(red.actual.is_none());
    }
}
