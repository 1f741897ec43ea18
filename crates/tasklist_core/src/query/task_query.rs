//! Filter/sort engine for task views.

use crate::model::catalog::{Category, ParseEnumError, Priority};
use crate::model::task::Task;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ALL_SENTINEL: &str = "all";

/// Completion-status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL_SENTINEL => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseEnumError::new("status filter", other)),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Most severe first.
    Priority,
    /// Earliest first, tasks without a due date last.
    DueDate,
    /// Category name, ascending.
    Category,
    /// Task text, ascending and case-insensitive.
    Alphabetical,
    /// Newest first.
    #[default]
    Created,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::Category => "category",
            Self::Alphabetical => "alphabetical",
            Self::Created => "created",
        }
    }

    /// Compares two tasks under this key. Equal keys compare `Equal` so a
    /// stable sort keeps their prior relative order.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => b.priority.rank().cmp(&a.priority.rank()),
            Self::DueDate => match (a.due_date, b.due_date) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(left), Some(right)) => left.cmp(&right),
            },
            Self::Category => a.category.as_str().cmp(b.category.as_str()),
            Self::Alphabetical => a
                .text
                .to_lowercase()
                .cmp(&b.text.to_lowercase())
                .then_with(|| a.text.cmp(&b.text)),
            Self::Created => b.created_at.cmp(&a.created_at),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort names fall back to `Created`, mirroring the default branch
/// of the sort selector.
impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "priority" => Self::Priority,
            "dueDate" => Self::DueDate,
            "category" => Self::Category,
            "alphabetical" => Self::Alphabetical,
            _ => Self::Created,
        })
    }
}

/// Parses a category filter where `"all"` means no filter.
pub fn parse_category_filter(value: &str) -> Result<Option<Category>, ParseEnumError> {
    if value == ALL_SENTINEL {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Parses a priority filter where `"all"` means no filter.
pub fn parse_priority_filter(value: &str) -> Result<Option<Priority>, ParseEnumError> {
    if value == ALL_SENTINEL {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Filter and sort parameters for one view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: StatusFilter,
    /// `None` matches every category.
    pub category: Option<Category>,
    /// `None` matches every priority.
    pub priority: Option<Priority>,
    pub sort: SortKey,
}

impl TaskQuery {
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Status, then category, then priority; all must hold.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task)
            && self.category.map_or(true, |category| task.category == category)
            && self.priority.map_or(true, |priority| task.priority == priority)
    }

    /// Returns the filtered, stably sorted view of `tasks`.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut view: Vec<&Task> = tasks.iter().filter(|task| self.matches(task)).collect();
        let sort = self.sort;
        view.sort_by(|a, b| sort.compare(a, b));
        view
    }
}

/// Header counters over the unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}
