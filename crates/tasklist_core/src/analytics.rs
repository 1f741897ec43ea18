//! Aggregate statistics over the full task list.
//!
//! # Responsibility
//! - Count totals, completions and overdue tasks.
//! - Break tasks down by category and priority.
//! - Average creation-to-completion time in fractional days.
//!
//! # Invariants
//! - Read-only: never mutates the tasks it summarizes.
//! - Breakdown maps only contain values that occur at least once.
//! - `average_completion_time` is `0.0` when nothing qualifies, never NaN.

use crate::model::catalog::{Category, Priority};
use crate::model::task::Task;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Derived task-list statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalytics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub category_breakdown: BTreeMap<Category, usize>,
    pub priority_breakdown: BTreeMap<Priority, usize>,
    /// Mean days from creation to completion.
    pub average_completion_time: f64,
}

impl TaskAnalytics {
    /// Computes statistics with one consistent `now`.
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut category_breakdown = BTreeMap::new();
        let mut priority_breakdown = BTreeMap::new();
        let mut completed_tasks = 0;
        let mut overdue_tasks = 0;
        let mut completion_millis = 0_i64;
        let mut completion_samples = 0_u32;

        for task in tasks {
            *category_breakdown.entry(task.category).or_insert(0) += 1;
            *priority_breakdown.entry(task.priority).or_insert(0) += 1;

            if task.completed {
                completed_tasks += 1;
            }
            if task.is_overdue(now) {
                overdue_tasks += 1;
            }
            if let Some(duration) = task.completion_duration() {
                completion_millis = completion_millis.saturating_add(duration.num_milliseconds());
                completion_samples += 1;
            }
        }

        let average_completion_time = if completion_samples == 0 {
            0.0
        } else {
            completion_millis as f64 / f64::from(completion_samples) / MILLIS_PER_DAY
        };

        Self {
            total_tasks: tasks.len(),
            completed_tasks,
            overdue_tasks,
            category_breakdown,
            priority_breakdown,
            average_completion_time,
        }
    }

    /// Pretty JSON document for export.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Download name used when exporting analytics for `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("todo_analytics_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, TaskAnalytics};
    use crate::model::catalog::{Category, Priority};
    use crate::model::task::{NewTask, Task, TaskId};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn empty_list_yields_zeroes() {
        let analytics = TaskAnalytics::compute(&[], Utc::now());
        assert_eq!(analytics.total_tasks, 0);
        assert_eq!(analytics.completed_tasks, 0);
        assert_eq!(analytics.overdue_tasks, 0);
        assert!(analytics.category_breakdown.is_empty());
        assert!(analytics.priority_breakdown.is_empty());
        assert_eq!(analytics.average_completion_time, 0.0);
    }

    #[test]
    fn averages_completion_time_in_days() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut first = Task::create(
            TaskId(1),
            NewTask::new("a", Category::Work, Priority::High),
            created,
        )
        .unwrap();
        let mut second = Task::create(
            TaskId(2),
            NewTask::new("b", Category::Work, Priority::Low),
            created,
        )
        .unwrap();
        let open = Task::create(
            TaskId(3),
            NewTask::new("c", Category::Health, Priority::Low),
            created,
        )
        .unwrap();
        first.toggle(created + Duration::days(1));
        second.toggle(created + Duration::days(2));

        let analytics = TaskAnalytics::compute(&[first, second, open], created);
        assert_eq!(analytics.completed_tasks, 2);
        assert!((analytics.average_completion_time - 1.5).abs() < 1e-9);
        assert_eq!(analytics.category_breakdown.get(&Category::Work), Some(&2));
        assert_eq!(analytics.category_breakdown.get(&Category::Other), None);
        assert_eq!(analytics.priority_breakdown.get(&Priority::Low), Some(&2));
    }

    #[test]
    fn json_uses_camel_case_and_lowercase_keys() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let task = Task::create(
            TaskId(1),
            NewTask::new("a", Category::Shopping, Priority::Medium),
            created,
        )
        .unwrap();
        let analytics = TaskAnalytics::compute(&[task], created);

        let json: serde_json::Value =
            serde_json::from_str(&analytics.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["totalTasks"], 1);
        assert_eq!(json["categoryBreakdown"]["shopping"], 1);
        assert_eq!(json["priorityBreakdown"]["medium"], 1);
        assert_eq!(json["averageCompletionTime"], 0.0);
    }

    #[test]
    fn export_file_name_embeds_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(export_file_name(date), "todo_analytics_2024-02-09.json");
    }
}
