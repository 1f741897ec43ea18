//! Ordered task collection with a monotonic id sequence.

use crate::model::task::{Task, TaskId};
use std::mem;

/// Ordered sequence of tasks plus the next id to hand out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// `None` once the id space is exhausted.
    next_id: Option<TaskId>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: Some(TaskId::FIRST),
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id the next `allocate_id` call will hand out.
    pub fn next_id(&self) -> Option<TaskId> {
        self.next_id
    }

    /// Hands out the next id and advances the sequence.
    ///
    /// Returns `None` once every id has been handed out; ids are never
    /// recycled.
    pub fn allocate_id(&mut self) -> Option<TaskId> {
        let id = self.next_id?;
        self.next_id = id.next();
        Some(id)
    }

    /// Appends a task.
    ///
    /// Returns `false` and leaves the store untouched when the id is already
    /// taken. Accepted ids at or past `next_id` advance the sequence.
    pub fn add(&mut self, task: Task) -> bool {
        if self.find_by_id(task.id).is_some() {
            return false;
        }
        if self.next_id.is_some_and(|next| task.id >= next) {
            self.next_id = task.id.next();
        }
        self.tasks.push(task);
        true
    }

    pub fn find_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Removes one task by id, returning it when present.
    pub fn remove_by_id(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Removes every task matching `predicate`; survivors keep their order.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> Vec<Task>
    where
        P: FnMut(&Task) -> bool,
    {
        let (removed, kept): (Vec<Task>, Vec<Task>) =
            mem::take(&mut self.tasks).into_iter().partition(|task| predicate(task));
        self.tasks = kept;
        removed
    }

    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Task) -> bool,
    {
        self.tasks.iter().filter(|task| predicate(task)).count()
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Rebuilds a store from persisted parts.
    ///
    /// `next_id` is raised past the largest stored id so ids are never
    /// reused, even when the saved counter lags behind the task list.
    pub(crate) fn from_parts(tasks: Vec<Task>, saved_next_id: Option<TaskId>) -> Self {
        let mut next_id = Some(saved_next_id.unwrap_or(TaskId::FIRST).max(TaskId::FIRST));
        for task in &tasks {
            if next_id.is_some_and(|next| task.id >= next) {
                next_id = task.id.next();
            }
        }
        Self { tasks, next_id }
    }
}
