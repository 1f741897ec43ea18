//! Due-date classification relative to a single `today`.

use crate::model::task::Task;
use chrono::NaiveDate;

/// Days-left window treated as "due soon" unless configured otherwise.
pub const DEFAULT_DUE_SOON_DAYS: u32 = 3;

/// How close a task is to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    /// Past due by `days` whole days.
    Overdue { days: u32 },
    DueToday,
    /// Due within the soon window, `days` left.
    DueSoon { days: u32 },
    /// Due later than the soon window.
    Upcoming { date: NaiveDate },
}

impl DueState {
    /// Classifies `due` against `today`.
    pub fn classify(due: NaiveDate, today: NaiveDate, due_soon_days: u32) -> Self {
        let diff = due.signed_duration_since(today).num_days();
        let days = u32::try_from(diff.unsigned_abs()).unwrap_or(u32::MAX);
        if diff < 0 {
            Self::Overdue { days }
        } else if diff == 0 {
            Self::DueToday
        } else if days <= due_soon_days {
            Self::DueSoon { days }
        } else {
            Self::Upcoming { date: due }
        }
    }

    /// Classifies a task; `None` when it has no due date.
    pub fn of(task: &Task, today: NaiveDate, due_soon_days: u32) -> Option<Self> {
        task.due_date
            .map(|due| Self::classify(due, today, due_soon_days))
    }

    /// Short CSS-style tag for presentation layers.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Overdue { .. } => "overdue",
            Self::DueToday => "due-today",
            Self::DueSoon { .. } => "due-soon",
            Self::Upcoming { .. } => "",
        }
    }
}
