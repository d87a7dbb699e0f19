//! Note use-case service.
//!
//! # Responsibility
//! - Provide stable create/update/delete/list entry points for core callers.
//! - Enforce field contracts (non-empty trimmed title/content) before any
//!   gateway write, since the gateway itself only checks id shape.
//!
//! # Invariants
//! - Persisted text is the trimmed form of the submitted text.
//! - Service layer remains storage-agnostic.

use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Field contract violation caught before touching storage.
    Validation(NoteValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for note CRUD operations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from form input and returns its assigned id.
    ///
    /// # Contract
    /// - Title and content are trimmed before persistence.
    /// - Blank title or content is rejected with a validation error.
    pub fn create_note(
        &self,
        title: &str,
        content: &str,
    ) -> Result<NoteId, NoteServiceError> {
        let note = Note::new(title.trim(), content.trim());
        note.validate()?;
        Ok(self.repo.insert_note(&note)?)
    }

    /// Overwrites title/content for an existing note.
    ///
    /// Returns the number of rows affected; zero means the id no longer
    /// exists, which the caller treats as non-fatal.
    pub fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<usize, NoteServiceError> {
        let note = Note::with_id(id, title.trim(), content.trim());
        note.validate()?;
        Ok(self.repo.update_note(&note)?)
    }

    /// Deletes one note by id. Zero rows affected is non-fatal.
    pub fn delete_note(&self, id: NoteId) -> Result<usize, NoteServiceError> {
        Ok(self.repo.delete_note(id)?)
    }

    /// Lists all notes, newest first.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_all()?)
    }
}
