//! Byte snapshot codec for `TaskStore`.
//!
//! # Responsibility
//! - Serialize the task sequence and id counter as one JSON document.
//! - Decode persisted bytes, rejecting records that break task invariants.
//!
//! # Invariants
//! - Decode failures never escape `TaskStore::deserialize`; callers get an
//!   empty store with `next_id = 1` instead.
//! - Wire shape: `{"todos":[...],"nextId":N}` with camelCase task fields.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::store::task_store::TaskStore;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors produced while encoding or decoding a store snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    InvalidTask(TaskValidationError),
    DuplicateId(TaskId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode task snapshot: {err}"),
            Self::InvalidTask(err) => write!(f, "invalid task in snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id {id} in snapshot"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<TaskValidationError> for SnapshotError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    todos: &'a [Task],
    next_id: Option<TaskId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotOwned {
    #[serde(default)]
    todos: Vec<Task>,
    #[serde(default)]
    next_id: Option<TaskId>,
}

impl TaskStore {
    /// Encodes the full store state as snapshot bytes.
    pub fn serialize(&self) -> Result<Vec<u8>, SnapshotError> {
        let snapshot = SnapshotRef {
            todos: self.all(),
            next_id: self.next_id(),
        };
        serde_json::to_vec(&snapshot).map_err(SnapshotError::Encode)
    }

    /// Decodes snapshot bytes, surfacing the first problem found.
    pub fn try_deserialize(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: SnapshotOwned =
            serde_json::from_slice(bytes).map_err(SnapshotError::Decode)?;

        let mut seen = HashSet::with_capacity(snapshot.todos.len());
        for task in &snapshot.todos {
            task.validate()?;
            if !seen.insert(task.id) {
                return Err(SnapshotError::DuplicateId(task.id));
            }
        }

        Ok(Self::from_parts(snapshot.todos, snapshot.next_id))
    }

    /// Decodes snapshot bytes, falling back to an empty store on any error.
    pub fn deserialize(bytes: &[u8]) -> Self {
        match Self::try_deserialize(bytes) {
            Ok(store) => store,
            Err(err) => {
                warn!(
                    "event=snapshot_decode module=store status=fallback bytes={} error={}",
                    bytes.len(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotError;
    use crate::model::task::TaskId;
    use crate::store::task_store::TaskStore;

    #[test]
    fn corrupt_bytes_fall_back_to_empty_store() {
        let store = TaskStore::deserialize(b"{not json");
        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(TaskId::FIRST));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let bytes = br#"{
            "todos": [
                {"id": 1, "text": "a", "category": "work", "priority": "low",
                 "dueDate": null, "completed": false,
                 "createdAt": "2024-01-01T00:00:00Z", "completedAt": null},
                {"id": 1, "text": "b", "category": "work", "priority": "low",
                 "dueDate": null, "completed": false,
                 "createdAt": "2024-01-01T00:00:00Z", "completedAt": null}
            ],
            "nextId": 2
        }"#;

        let err = TaskStore::try_deserialize(bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateId(TaskId(1))));
        assert!(TaskStore::deserialize(bytes).is_empty());
    }

    #[test]
    fn completion_mismatch_is_rejected() {
        let bytes = br#"{"todos":[{"id":1,"text":"a","category":"health","priority":"high",
            "completed":true,"createdAt":"2024-01-01T00:00:00Z"}],"nextId":2}"#;
        let err = TaskStore::try_deserialize(bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidTask(_)));
    }

    #[test]
    fn missing_next_id_is_derived_from_tasks() {
        let bytes = br#"{"todos":[{"id":4,"text":"a","category":"other","priority":"medium",
            "completed":false,"createdAt":"2024-01-01T00:00:00Z"}]}"#;
        let store = TaskStore::try_deserialize(bytes).unwrap();
        assert_eq!(store.next_id(), Some(TaskId(5)));
    }
}
