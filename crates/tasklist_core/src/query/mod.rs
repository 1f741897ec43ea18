//! Derived read-only views over the task list.
//!
//! # Responsibility
//! - Filter and sort tasks for display.
//! - Compute status counters and due-date classification.
//!
//! # Invariants
//! - Queries never mutate the store.
//! - Sorting is stable so unchanged data renders in the same order.
//! - One `today` value is used for a whole classification pass.

pub mod due;
pub mod task_query;
