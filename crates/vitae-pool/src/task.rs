//! Task and Result Types
//!
//! The wire form is `{index, payload}` going in and `{index, result}` or
//! `{index, error}` coming back, matching what a remote worker transport
//! would carry.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One unit of work: an opaque payload tagged with its position in the
/// submitting batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub index: usize,
    pub payload: String,
}

impl Task {
    pub fn new(index: usize, payload: impl Into<String>) -> Self {
        Self {
            index,
            payload: payload.into(),
        }
    }
}

/// What a unit produced for one task. A `Failed` outcome is ordinary
/// data, not a unit fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Html(String),
    Failed(String),
}

/// A completed task, correlated back to its submission by `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub index: usize,
    pub outcome: TaskOutcome,
}

#[derive(Serialize, Deserialize)]
struct WireResult {
    index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Serialize for TaskResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match &self.outcome {
            TaskOutcome::Html(html) => WireResult {
                index: self.index,
                result: Some(html.clone()),
                error: None,
            },
            TaskOutcome::Failed(message) => WireResult {
                index: self.index,
                result: None,
                error: Some(message.clone()),
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TaskResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireResult::deserialize(deserializer)?;
        let outcome = match (wire.result, wire.error) {
            (Some(html), None) => TaskOutcome::Html(html),
            (None, Some(message)) => TaskOutcome::Failed(message),
            (Some(_), Some(_)) => {
                return Err(D::Error::custom("task result carries both result and error"))
            }
            (None, None) => {
                return Err(D::Error::custom("task result carries neither result nor error"))
            }
        };
        Ok(TaskResult {
            index: wire.index,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_as_index_and_result() {
        let result = TaskResult {
            index: 2,
            outcome: TaskOutcome::Html("<p>ok</p>".into()),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"index":2,"result":"<p>ok</p>"}"#);
        assert_eq!(serde_json::from_str::<TaskResult>(&json).unwrap(), result);
    }

    #[test]
    fn failure_serializes_as_index_and_error() {
        let result = TaskResult {
            index: 0,
            outcome: TaskOutcome::Failed("bad payload".into()),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"index":0,"error":"bad payload"}"#);
        assert_eq!(serde_json::from_str::<TaskResult>(&json).unwrap(), result);
    }

    #[test]
    fn ambiguous_wire_forms_are_rejected() {
        assert!(serde_json::from_str::<TaskResult>(r#"{"index":1}"#).is_err());
        assert!(
            serde_json::from_str::<TaskResult>(r#"{"index":1,"result":"a","error":"b"}"#).is_err()
        );
    }
}
