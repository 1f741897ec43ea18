//! Task-list domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its closed enumerations.
//! - Provide lifecycle helpers that keep completion fields consistent.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` that is never reused.
//! - `completed_at` is present iff `completed` is true.
//! - Task text is trimmed and non-empty.

pub mod catalog;
pub mod task;
