//! Persistence adapters for the task store.
//!
//! # Responsibility
//! - Define the key-value byte store contract and its backends.
//! - Save and load task-store snapshots through that contract.
//!
//! # Invariants
//! - Adapters never panic on malformed persisted data; they return errors
//!   for the service layer to absorb.

pub mod kv_repo;
pub mod snapshot_repo;
