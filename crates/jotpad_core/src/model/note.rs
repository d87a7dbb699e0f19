//! Note domain model.
//!
//! # Responsibility
//! - Define the sole persisted entity: a titled text record.
//! - Provide draft/persisted lifecycle helpers.
//!
//! # Invariants
//! - `id` is `None` only for a draft that has never been inserted.
//! - Once assigned by storage, `id` never changes.
//! - `title` and `content` must be non-empty after trimming to persist.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned row identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Validation error for note field contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming whitespace.
    EmptyTitle,
    /// Content is empty after trimming whitespace.
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
///
/// The same shape serves drafts under construction in the editor form and
/// rows loaded back from storage; `id` distinguishes the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Storage-assigned identifier. `None` until the first successful insert.
    pub id: Option<NoteId>,
    /// Short display title.
    pub title: String,
    /// Free-form body text.
    pub content: String,
}

impl Note {
    /// Creates an unpersisted draft note.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Creates a note carrying an already-assigned storage id.
    ///
    /// Used by read paths and by update flows where identity exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns whether this note has been assigned a storage id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks field contracts required before any write.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `EmptyContent` when the trimmed content is empty.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}
