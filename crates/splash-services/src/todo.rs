//! Task types exchanged with the todo API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned task identifier.
///
/// Kept opaque. Backends differ on whether ids are strings (document
/// stores) or integers (SQL autoincrement), so both deserialize into the
/// same string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Text(String),
    Number(i64),
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawTaskId::deserialize(deserializer)? {
            RawTaskId::Text(id) => TaskId(id),
            RawTaskId::Number(id) => TaskId(id.to_string()),
        })
    }
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// Wire shape of a task. Document stores send `_id`, often next to `id`;
/// `id` wins when both are present.
#[derive(Deserialize)]
struct RawTask {
    id: Option<TaskId>,
    #[serde(rename = "_id")]
    object_id: Option<TaskId>,
    text: String,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<RawTask> for Task {
    type Error = String;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.object_id)
            .ok_or_else(|| "missing field `id`".to_string())?;
        Ok(Task {
            id,
            text: raw.text,
            completed: raw.completed,
        })
    }
}

/// Body of create and update requests. Update is a full replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    pub text: String,
    pub completed: bool,
}

impl TaskPayload {
    /// Payload for a task that is not completed.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}
