//! FFI use-case API for the host UI shell.
//!
//! # Responsibility
//! - Expose the single-screen editor to the UI as stable sync functions.
//! - Hold the process-wide editor state the view renders from.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failed dispatches leave the previous editor state intact.

use jotpad_core::db::open_db;
use jotpad_core::{
    core_version as core_version_inner, dispatch, init_logging as init_logging_inner,
    ping as ping_inner, EditorIntent, EditorState, Note, NoteService, SqliteNoteRepository,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const EDITOR_DB_FILE_NAME: &str = "jotpad.sqlite3";
static EDITOR_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static EDITOR_STATE: Mutex<Option<EditorState>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One list entry as the view renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    /// Storage-assigned row id.
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Full editor state snapshot for view rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorStateView {
    /// Current list snapshot, newest first.
    pub notes: Vec<NoteView>,
    /// Current form title text.
    pub title_field: String,
    /// Current form content text.
    pub content_field: String,
    /// `None` while creating, `Some(id)` while editing an existing note.
    pub editing_id: Option<i64>,
}

/// Dispatch response envelope for editor intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDispatchResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// State to render from after this call.
    pub state: EditorStateView,
}

/// Loads the initial snapshot and returns the state to render.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Idempotent; safe to call again to force a full reload.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_bootstrap() -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::Refresh, "Editor ready.")
}

/// Returns the current cached editor state without touching storage.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics.
/// - Returns an empty Create-mode state before the first bootstrap.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_state() -> EditorStateView {
    let guard = lock_editor_state();
    to_state_view(guard.as_ref().unwrap_or(&EditorState::default()))
}

/// Replaces the form title text.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_edit_title(value: String) -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::EditTitle(value), "Title updated.")
}

/// Replaces the form content text.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_edit_content(value: String) -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::EditContent(value), "Content updated.")
}

/// Enters Edit mode for one list entry, pre-filling the form.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_select_note(id: i64) -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::SelectNote(id), "Selection applied.")
}

/// Saves the form: insert in Create mode, update in Edit mode.
///
/// Blank trimmed title or content writes nothing and keeps the form.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_submit() -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::Submit, "Submit processed.")
}

/// Deletes one note by id and refreshes the list.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_delete(id: i64) -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::Delete(id), "Delete processed.")
}

/// Resets to Create mode, discarding unsaved edits.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_clear() -> EditorDispatchResponse {
    dispatch_intent(EditorIntent::Clear, "Form cleared.")
}

fn dispatch_intent(intent: EditorIntent, ok_message: &str) -> EditorDispatchResponse {
    let mut guard = lock_editor_state();
    let current = guard.clone().unwrap_or_default();

    let dispatched = with_note_service(|service| {
        dispatch(&current, intent, service).map_err(|err| err.to_string())
    });

    match dispatched {
        Ok(next) => {
            let state = to_state_view(&next);
            *guard = Some(next);
            EditorDispatchResponse {
                ok: true,
                message: ok_message.to_string(),
                state,
            }
        }
        Err(message) => {
            log::warn!("event=editor_dispatch module=ffi status=error error={message}");
            EditorDispatchResponse {
                ok: false,
                message: format!("editor dispatch failed: {message}"),
                state: to_state_view(&current),
            }
        }
    }
}

fn lock_editor_state() -> std::sync::MutexGuard<'static, Option<EditorState>> {
    // A poisoned lock only means a previous panic; the state value is still
    // coherent because dispatch replaces it wholesale.
    EDITOR_STATE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn with_note_service<T>(
    f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_editor_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("editor DB open failed: {err}"))?;
    let repo = SqliteNoteRepository::try_new(&conn)
        .map_err(|err| format!("editor repo init failed: {err}"))?;
    let service = NoteService::new(repo);
    f(&service)
}

fn resolve_editor_db_path() -> PathBuf {
    EDITOR_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("JOTPAD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(EDITOR_DB_FILE_NAME)
        })
        .clone()
}

fn to_state_view(state: &EditorState) -> EditorStateView {
    EditorStateView {
        notes: state.notes.iter().filter_map(to_note_view).collect(),
        title_field: state.title_field.clone(),
        content_field: state.content_field.clone(),
        editing_id: state.editing_id,
    }
}

fn to_note_view(note: &Note) -> Option<NoteView> {
    Some(NoteView {
        id: note.id?,
        title: note.title.clone(),
        content: note.content.clone(),
    })
}
