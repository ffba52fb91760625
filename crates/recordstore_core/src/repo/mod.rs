//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract the service layer is written against.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Inserts only accept records that already passed draft validation.
//! - Removing a missing id is reported as `false`, never as an error.

pub mod record_repo;
