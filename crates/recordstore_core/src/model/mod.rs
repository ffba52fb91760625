//! Domain model for the record collection.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep draft validation next to the types it guards.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `RecordId`.
//! - Records are created or hard-deleted, never edited in place.

pub mod record;
