//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce id-shape contracts (draft vs. persisted), not
//!   content validation; content contracts belong to the caller.
//! - Zero-rows-affected on update/delete is reported as a count, not an
//!   error.

pub mod note_repo;
