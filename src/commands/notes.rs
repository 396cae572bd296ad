use crate::app::{cardio_get, cardio_save_notes, strength_get, strength_save_notes};
use crate::domain::convert::normalize_notes;
use crate::domain::LogKind;
use crate::error::AppError;
use crate::infra::{run_blocking, DbPool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesView {
    pub kind: LogKind,
    pub id: i64,
    /// Exercise name, or a generic title when the entry no longer exists.
    pub title: String,
    pub text: String,
    pub found: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesSaveReq {
    pub kind: LogKind,
    pub id: i64,
    pub text: String,
}

pub async fn cmd_notes_load(pool: &Arc<DbPool>, kind: LogKind, id: i64) -> Result<NotesView, AppError> {
    run_blocking(pool, move |p| {
        let entry = match kind {
            LogKind::Strength => strength_get(p, id)?.map(|e| (e.exercise, e.notes)),
            LogKind::Cardio => cardio_get(p, id)?.map(|e| (e.exercise, e.notes)),
        };
        Ok(match entry {
            Some((title, notes)) => NotesView {
                kind,
                id,
                title,
                text: notes.unwrap_or_default(),
                found: true,
            },
            None => NotesView {
                kind,
                id,
                title: kind.placeholder_title().to_string(),
                text: String::new(),
                found: false,
            },
        })
    })
    .await
}

/// Returns whether an entry was updated; a vanished entry is not an error.
pub async fn cmd_notes_save(pool: &Arc<DbPool>, req: NotesSaveReq) -> Result<bool, AppError> {
    let notes = normalize_notes(&req.text);
    run_blocking(pool, move |p| {
        let saved = match req.kind {
            LogKind::Strength => strength_save_notes(p, req.id, notes)?.is_some(),
            LogKind::Cardio => cardio_save_notes(p, req.id, notes)?.is_some(),
        };
        Ok(saved)
    })
    .await
}
