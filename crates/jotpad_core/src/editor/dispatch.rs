//! Single update function advancing the editor state.
//!
//! # Responsibility
//! - Map each user intent to its gateway calls and produce the next state.
//! - Keep the mutate-then-relist ordering strict: a mutation fully completes
//!   before the re-list, and the fresh snapshot fully replaces the old one.
//!
//! # Invariants
//! - On any error the caller's previous state is left untouched.
//! - Blank-input submits write nothing and surface nothing; they are only
//!   logged (known gap in the original behavior, kept as-is).

use crate::editor::state::EditorState;
use crate::model::note::NoteId;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User intents the single-screen editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorIntent {
    /// Replace the form title text.
    EditTitle(String),
    /// Replace the form content text.
    EditContent(String),
    /// Enter Edit mode for an existing snapshot entry.
    SelectNote(NoteId),
    /// Save the form: insert in Create mode, update in Edit mode.
    Submit,
    /// Delete one note by id.
    Delete(NoteId),
    /// Reset to Create mode, discarding unsaved edits.
    Clear,
    /// Re-fetch the snapshot without touching the form.
    Refresh,
}

/// Controller error wrapping use-case failures.
#[derive(Debug)]
pub enum EditorError {
    Service(NoteServiceError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
        }
    }
}

impl From<NoteServiceError> for EditorError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

/// Loads the initial snapshot for a freshly started editor.
pub fn bootstrap<R: NoteRepository>(
    service: &NoteService<R>,
) -> Result<EditorState, EditorError> {
    dispatch(&EditorState::default(), EditorIntent::Refresh, service)
}

/// Advances the editor state by one intent.
///
/// The only entry point for state transitions; form-only intents never touch
/// storage, mutation intents run gateway call then full re-list.
pub fn dispatch<R: NoteRepository>(
    state: &EditorState,
    intent: EditorIntent,
    service: &NoteService<R>,
) -> Result<EditorState, EditorError> {
    match intent {
        EditorIntent::EditTitle(value) => Ok(state.with_title(value)),
        EditorIntent::EditContent(value) => Ok(state.with_content(value)),
        EditorIntent::SelectNote(id) => match state.note_by_id(id) {
            Some(note) => Ok(state.selecting(note)),
            None => {
                // Stale view: the id is gone from the snapshot. Keep the form.
                warn!("event=editor_select module=editor status=ignored reason=unknown_id id={id}");
                Ok(state.clone())
            }
        },
        EditorIntent::Submit => submit(state, service),
        EditorIntent::Delete(id) => delete(state, id, service),
        EditorIntent::Clear => Ok(state.cleared_form()),
        EditorIntent::Refresh => {
            let notes = service.list_notes()?;
            Ok(state.refreshed(notes))
        }
    }
}

fn submit<R: NoteRepository>(
    state: &EditorState,
    service: &NoteService<R>,
) -> Result<EditorState, EditorError> {
    let Some(draft) = state.trimmed_draft() else {
        debug!("event=editor_submit module=editor status=rejected reason=blank_field");
        return Ok(state.clone());
    };

    match state.editing_id {
        None => {
            let id = service.create_note(&draft.title, &draft.content)?;
            info!("event=editor_submit module=editor status=ok op=insert id={id}");
        }
        Some(id) => {
            let affected = service.update_note(id, &draft.title, &draft.content)?;
            if affected == 0 {
                warn!("event=editor_submit module=editor status=ok op=update id={id} rows=0");
            } else {
                info!("event=editor_submit module=editor status=ok op=update id={id}");
            }
        }
    }

    let notes = service.list_notes()?;
    Ok(state.refreshed(notes).cleared_form())
}

fn delete<R: NoteRepository>(
    state: &EditorState,
    id: NoteId,
    service: &NoteService<R>,
) -> Result<EditorState, EditorError> {
    let affected = service.delete_note(id)?;
    if affected == 0 {
        warn!("event=editor_delete module=editor status=ok id={id} rows=0");
    } else {
        info!("event=editor_delete module=editor status=ok id={id}");
    }

    let notes = service.list_notes()?;
    let next = state.refreshed(notes);
    if state.editing_id == Some(id) {
        Ok(next.cleared_form())
    } else {
        Ok(next)
    }
}
