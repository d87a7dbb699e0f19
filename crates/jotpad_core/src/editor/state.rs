//! Editor state value and pure form transitions.
//!
//! # Responsibility
//! - Define the immutable state the view renders from.
//! - Provide value-returning transition helpers with no storage access.
//!
//! # Invariants
//! - `editing_id == None` means Create mode; `Some(id)` means Edit mode for
//!   the note with that id.
//! - `notes` is always a full snapshot, never a partial patch.

use crate::model::note::{Note, NoteId};

/// Full state of the single-screen editor.
///
/// The view renders exclusively from this value; the controller replaces it
/// wholesale after each intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Last full snapshot returned by the storage gateway, newest first.
    pub notes: Vec<Note>,
    /// Current form title text, unvalidated.
    pub title_field: String,
    /// Current form content text, unvalidated.
    pub content_field: String,
    /// `None` while creating a new note, `Some` while editing an existing one.
    pub editing_id: Option<NoteId>,
}

/// Trimmed, non-blank form input ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedDraft {
    pub title: String,
    pub content: String,
}

impl EditorState {
    /// Returns whether the form is in Edit mode.
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Looks up a snapshot entry by id.
    pub fn note_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == Some(id))
    }

    /// Replaces the form title text.
    pub fn with_title(&self, value: impl Into<String>) -> Self {
        Self {
            title_field: value.into(),
            ..self.clone()
        }
    }

    /// Replaces the form content text.
    pub fn with_content(&self, value: impl Into<String>) -> Self {
        Self {
            content_field: value.into(),
            ..self.clone()
        }
    }

    /// Enters Edit mode pre-filled from the given snapshot entry.
    pub fn selecting(&self, note: &Note) -> Self {
        Self {
            notes: self.notes.clone(),
            title_field: note.title.clone(),
            content_field: note.content.clone(),
            editing_id: note.id,
        }
    }

    /// Replaces the snapshot, leaving the form untouched.
    pub fn refreshed(&self, notes: Vec<Note>) -> Self {
        Self {
            notes,
            ..self.clone()
        }
    }

    /// Resets to Create mode, discarding unsaved field edits.
    pub fn cleared_form(&self) -> Self {
        Self {
            notes: self.notes.clone(),
            title_field: String::new(),
            content_field: String::new(),
            editing_id: None,
        }
    }

    /// Returns the trimmed form input, or `None` when either field is blank.
    pub fn trimmed_draft(&self) -> Option<TrimmedDraft> {
        let title = self.title_field.trim();
        let content = self.content_field.trim();
        if title.is_empty() || content.is_empty() {
            return None;
        }
        Some(TrimmedDraft {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}
