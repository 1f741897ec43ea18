//! Core domain logic for the task-list manager.
//! This crate is the single source of truth for task invariants.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use analytics::{export_file_name, TaskAnalytics};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{Category, CategoryMeta, ParseEnumError, Priority, PriorityMeta};
pub use model::task::{NewTask, Task, TaskId, TaskValidationError};
pub use query::due::DueState;
pub use query::task_query::{
    parse_category_filter, parse_priority_filter, SortKey, StatusCounts, StatusFilter, TaskQuery,
};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use repo::snapshot_repo::{PersistError, PersistResult, SnapshotRepository};
pub use service::task_service::{TaskRow, TaskService};
pub use store::snapshot::SnapshotError;
pub use store::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
