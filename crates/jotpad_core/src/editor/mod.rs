//! Presentation controller for the single-screen note editor.
//!
//! # Responsibility
//! - Hold the list snapshot and in-progress form as one explicit state value.
//! - Translate user intents into gateway calls plus a snapshot refresh.
//!
//! # Invariants
//! - State is advanced only through [`dispatch::dispatch`]; transitions are
//!   value-in/value-out so they stay independently testable.
//! - Every successful mutation is followed by a full re-list before the new
//!   state is produced; stale and fresh rows never interleave.

pub mod dispatch;
pub mod state;
