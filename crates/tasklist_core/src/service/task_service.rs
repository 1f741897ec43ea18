//! Task-list use-case service.
//!
//! # Responsibility
//! - Own the task store and drive its load/save lifecycle.
//! - Provide create/toggle/edit/delete/clear-completed entry points.
//! - Expose query, counter and analytics views for presentation layers.
//!
//! # Invariants
//! - Rejected input and unknown ids change nothing and save nothing.
//! - Every state change is followed by exactly one snapshot save.
//! - Persistence failures never abort a mutation; they are kept as a
//!   warning for the caller to surface.

use crate::analytics::TaskAnalytics;
use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::model::task::{NewTask, Task, TaskId};
use crate::query::due::DueState;
use crate::query::task_query::{StatusCounts, TaskQuery};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::snapshot_repo::{PersistError, SnapshotRepository};
use crate::store::task_store::TaskStore;
use log::{debug, info, warn};

/// One row of a rendered view: the task plus its due classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub due: Option<DueState>,
}

/// Task-list facade over a key-value backend.
pub struct TaskService<K: KeyValueStore, C: Clock = SystemClock> {
    store: TaskStore,
    repo: SnapshotRepository<K>,
    clock: C,
    due_soon_days: u32,
    warning: Option<PersistError>,
}

impl<K: KeyValueStore> TaskService<K, SystemClock> {
    /// Creates a service with an empty store, wall-clock time and defaults.
    ///
    /// Call `load` to restore a previous session.
    pub fn new(kv: K) -> Self {
        Self::with_config(kv, &CoreConfig::default())
    }

    pub fn with_config(kv: K, config: &CoreConfig) -> Self {
        Self::with_clock(kv, SystemClock, config)
    }
}

impl<K: KeyValueStore, C: Clock> TaskService<K, C> {
    /// Creates a service with an explicit clock and configuration.
    ///
    /// A blank snapshot key falls back to the default key and the due-soon
    /// window is clamped, whether or not `config` was normalized.
    pub fn with_clock(kv: K, clock: C, config: &CoreConfig) -> Self {
        Self {
            store: TaskStore::new(),
            repo: SnapshotRepository::with_key(kv, config.effective_snapshot_key()),
            clock,
            due_soon_days: config.effective_due_soon_days(),
            warning: None,
        }
    }

    /// Replaces in-memory state with the persisted snapshot.
    ///
    /// A missing snapshot yields an empty store. An unreadable or corrupt
    /// snapshot also yields an empty store (`next_id = 1`) and records a
    /// warning. Returns the number of tasks restored.
    pub fn load(&mut self) -> usize {
        self.store = match self.repo.load() {
            Ok(Some(store)) => store,
            Ok(None) => TaskStore::new(),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=service status=fallback error={}",
                    err
                );
                self.warning = Some(err);
                TaskStore::new()
            }
        };
        self.store.len()
    }

    /// Writes the current store. Returns whether the save succeeded.
    ///
    /// On failure the in-memory store stays as-is and a warning is recorded.
    pub fn save(&mut self) -> bool {
        match self.repo.save(&self.store) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=snapshot_save module=service status=failed tasks={}",
                    self.store.len()
                );
                self.warning = Some(err);
                false
            }
        }
    }

    /// Takes the most recent persistence warning, if any.
    pub fn take_warning(&mut self) -> Option<PersistError> {
        self.warning.take()
    }

    /// Creates a task from user input.
    ///
    /// Returns `None` without touching state when the text is blank or the
    /// id space is exhausted.
    pub fn create(&mut self, input: NewTask) -> Option<TaskId> {
        let now = self.clock.now();
        let Some(id) = self.store.next_id() else {
            warn!("event=task_create module=service status=rejected reason=id_space_exhausted");
            return None;
        };
        let task = match Task::create(id, input, now) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_create module=service status=rejected reason={err}");
                return None;
            }
        };

        if self.store.allocate_id() != Some(id) || !self.store.add(task) {
            warn!("event=task_create module=service status=rejected reason=id_taken id={id}");
            return None;
        }
        info!("event=task_create module=service status=ok id={id}");
        self.save();
        Some(id)
    }

    /// Flips completion of one task; returns the new state.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let now = self.clock.now();
        let completed = self.store.find_by_id_mut(id)?.toggle(now);
        info!("event=task_toggle module=service status=ok id={id} completed={completed}");
        self.save();
        Some(completed)
    }

    /// Replaces task text; returns whether anything changed.
    pub fn edit(&mut self, id: TaskId, text: &str) -> bool {
        let Some(task) = self.store.find_by_id_mut(id) else {
            return false;
        };
        if !task.edit_text(text) {
            return false;
        }
        info!("event=task_edit module=service status=ok id={id}");
        self.save();
        true
    }

    /// Removes one task; returns it when it existed.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.store.remove_by_id(id)?;
        info!("event=task_delete module=service status=ok id={id}");
        self.save();
        Some(removed)
    }

    /// Removes every completed task; returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let removed = self.store.remove_where(|task| task.completed).len();
        if removed > 0 {
            info!("event=tasks_clear_completed module=service status=ok removed={removed}");
            self.save();
        }
        removed
    }

    /// How many tasks `clear_completed` would remove right now.
    pub fn completed_count(&self) -> usize {
        self.store.count_where(|task| task.completed)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.find_by_id(id)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.all()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn kv(&self) -> &K {
        self.repo.kv()
    }

    /// Filtered, sorted view.
    pub fn query(&self, query: &TaskQuery) -> Vec<&Task> {
        query.apply(self.store.all())
    }

    /// Filtered, sorted view with due classification against one `today`.
    pub fn rows(&self, query: &TaskQuery) -> Vec<TaskRow<'_>> {
        let today = self.clock.today();
        query
            .apply(self.store.all())
            .into_iter()
            .map(|task| TaskRow {
                task,
                due: DueState::of(task, today, self.due_soon_days),
            })
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::of(self.store.all())
    }

    pub fn analytics(&self) -> TaskAnalytics {
        TaskAnalytics::compute(self.store.all(), self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::TaskService;
    use crate::clock::ManualClock;
    use crate::config::{CoreConfig, MAX_DUE_SOON_DAYS};
    use crate::model::catalog::{Category, Priority};
    use crate::model::task::{NewTask, TaskId};
    use crate::repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore};
    use crate::repo::snapshot_repo::DEFAULT_SNAPSHOT_KEY;
    use chrono::{TimeZone, Utc};

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> KvResult<Option<Vec<u8>>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> KvResult<()> {
            Err(KvError::Rejected("quota exceeded".to_string()))
        }
    }

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn blank_create_does_not_consume_an_id_or_save() {
        let kv = MemoryKeyValueStore::new();
        let mut service = TaskService::with_clock(&kv, clock(), &CoreConfig::default());

        assert_eq!(
            service.create(NewTask::new("  ", Category::Work, Priority::Low)),
            None
        );
        assert_eq!(service.store().next_id(), Some(TaskId::FIRST));
        assert!(kv.get(&CoreConfig::default().snapshot_key).unwrap().is_none());
    }

    #[test]
    fn failed_save_keeps_mutation_and_records_warning() {
        let mut service = TaskService::with_clock(ReadOnlyStore, clock(), &CoreConfig::default());

        let id = service
            .create(NewTask::new("buy milk", Category::Shopping, Priority::Low))
            .unwrap();
        assert!(service.get(id).is_some());
        let warning = service.take_warning().unwrap();
        assert!(warning.to_string().contains("quota exceeded"));
        assert!(service.take_warning().is_none());
    }

    #[test]
    fn unnormalized_config_is_clamped_and_keyed_by_default() {
        let config = CoreConfig {
            snapshot_key: "   ".to_string(),
            due_soon_days: 99,
            ..CoreConfig::default()
        };
        let kv = MemoryKeyValueStore::new();
        let mut service = TaskService::with_clock(&kv, clock(), &config);

        assert_eq!(service.repo.key(), DEFAULT_SNAPSHOT_KEY);
        assert_eq!(service.due_soon_days, MAX_DUE_SOON_DAYS);
        service
            .create(NewTask::new("walk", Category::Health, Priority::Low))
            .unwrap();
        assert!(kv.get(DEFAULT_SNAPSHOT_KEY).unwrap().is_some());
        assert!(kv.get("   ").unwrap().is_none());
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut service = TaskService::with_clock(
            MemoryKeyValueStore::new(),
            clock(),
            &CoreConfig::default(),
        );
        assert_eq!(service.toggle(TaskId(42)), None);
        assert!(!service.edit(TaskId(42), "x"));
        assert!(service.delete(TaskId(42)).is_none());
        assert_eq!(service.clear_completed(), 0);
        assert!(service.kv().get(&CoreConfig::default().snapshot_key).unwrap().is_none());
    }
}
