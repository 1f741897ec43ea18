//! In-memory task store and its snapshot codec.
//!
//! # Responsibility
//! - Own the ordered task sequence and the id counter.
//! - Encode/decode the store as a byte snapshot for persistence adapters.
//!
//! # Invariants
//! - Ids are unique and never reused; `next_id` is greater than every stored id
//!   until the id space runs out, after which no further ids are handed out.
//! - Insertion order is preserved by every operation.

pub mod snapshot;
pub mod task_store;
