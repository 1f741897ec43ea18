//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted in snapshots.
//! - Provide completion lifecycle helpers that keep timestamps consistent.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused.
//! - `created_at` is set once and never changes.
//! - `completed_at.is_some() == completed` after every helper call.
//! - `text` is trimmed and non-empty.

use crate::model::catalog::{Category, Priority};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// First id handed out by an empty store.
    pub const FIRST: TaskId = TaskId(1);

    /// Following id; `None` once the id space is exhausted.
    pub fn next(self) -> Option<TaskId> {
        self.0.checked_add(1).map(TaskId)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// `completed` and `completed_at` disagree.
    InconsistentCompletion { id: TaskId, completed: bool },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::InconsistentCompletion { id, completed } => write!(
                f,
                "task {id} has completed={completed} but completed_at does not match"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Input accepted by the create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(text: impl Into<String>, category: Category, priority: Priority) -> Self {
        Self {
            text: text.into(),
            category,
            priority,
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds an active task from creation input.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `input.text` is blank after trimming.
    pub fn create(
        id: TaskId,
        input: NewTask,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        let text = normalize_text(&input.text).ok_or(TaskValidationError::EmptyText)?;
        Ok(Self {
            id,
            text,
            category: input.category,
            priority: input.priority,
            due_date: input.due_date,
            completed: false,
            created_at,
            completed_at: None,
        })
    }

    /// Checks text and completion invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        if self.completed != self.completed_at.is_some() {
            return Err(TaskValidationError::InconsistentCompletion {
                id: self.id,
                completed: self.completed,
            });
        }
        Ok(())
    }

    /// Flips completion state and returns the new value.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> bool {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
        self.completed
    }

    /// Replaces text when the trimmed input is non-empty and differs.
    ///
    /// Returns whether the text changed.
    pub fn edit_text(&mut self, text: &str) -> bool {
        match normalize_text(text) {
            Some(normalized) if normalized != self.text => {
                self.text = normalized;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// Due date as a UTC instant at the start of that day.
    pub fn due_instant(&self) -> Option<DateTime<Utc>> {
        self.due_date
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Incomplete and due strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_instant().is_some_and(|due| due < now)
    }

    /// Time from creation to completion, when completed.
    pub fn completion_duration(&self) -> Option<Duration> {
        match (self.completed, self.completed_at) {
            (true, Some(completed_at)) => Some(completed_at - self.created_at),
            _ => None,
        }
    }
}

/// Trims user text; `None` when nothing is left.
pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
