//! Presentation boundary tests: form coercion, notes editor, catalog and goal commands

use chrono::NaiveDate;
use fitjournal::app::{cardio_get, master_list, strength_get, strength_list_for_date};
use fitjournal::commands::{
    cmd_cardio_delete, cmd_cardio_edit, cmd_cardio_log, cmd_goal_set, cmd_master_add,
    cmd_master_remove, cmd_master_rename, cmd_notes_load, cmd_notes_save, cmd_strength_delete,
    cmd_strength_edit, cmd_strength_log, CardioForm, MasterAddReq, MasterRenameReq, NotesSaveReq,
    StrengthForm,
};
use fitjournal::domain::{LogKind, MasterKind};
use fitjournal::infra::db::init_test_db;
use fitjournal::infra::DbPool;
use std::sync::Arc;

// ──────────────────────── Helper ────────────────────────

fn pool() -> Arc<DbPool> {
    Arc::new(init_test_db())
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn strength_form(exercise: &str, sets: &str, reps: &str, weight: &str) -> StrengthForm {
    StrengthForm {
        date: day(),
        exercise: exercise.into(),
        sets: sets.into(),
        reps: reps.into(),
        weight: weight.into(),
        notes: String::new(),
    }
}

fn cardio_form(exercise: &str, duration: &str, distance: &str) -> CardioForm {
    CardioForm {
        date: day(),
        exercise: exercise.into(),
        duration: duration.into(),
        distance: distance.into(),
        notes: String::new(),
    }
}

// ══════════════════════════════════════════════════════════
//  workout dialogs
// ══════════════════════════════════════════════════════════

#[tokio::test]
async fn blank_and_garbage_fields_become_zero() {
    let pool = pool();
    let stored = cmd_strength_log(&pool, strength_form("Squat", "", "abc", "-5"))
        .await
        .unwrap();
    assert_eq!((stored.sets, stored.reps, stored.weight), (0, 0, 0.0));

    let cardio = cmd_cardio_log(&pool, cardio_form("Running", " 30 ", "5.25"))
        .await
        .unwrap();
    assert_eq!(cardio.duration, 30);
    assert_eq!(cardio.distance, 5.25);
}

#[tokio::test]
async fn missing_exercise_is_rejected_before_writing() {
    let pool = pool();
    let err = cmd_strength_log(&pool, strength_form("  ", "5", "5", "100"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(strength_list_for_date(&pool, day()).unwrap().is_empty());
}

#[tokio::test]
async fn form_notes_are_stored_on_log() {
    let pool = pool();
    let mut form = cardio_form("Rowing", "20", "4");
    form.notes = "steady".into();
    let stored = cmd_cardio_log(&pool, form).await.unwrap();
    assert_eq!(stored.notes.as_deref(), Some("steady"));
}

#[test]
fn form_deserializes_from_camel_case_json() {
    let form: StrengthForm =
        serde_json::from_str(r#"{"date":"2024-03-04","exercise":"Deadlift","sets":"3"}"#).unwrap();
    let record = form.into_record(0).unwrap();
    assert_eq!(record.date, day());
    assert_eq!(record.sets, 3);
    assert_eq!(record.reps, 0);
    assert_eq!(record.notes, None);
}

#[tokio::test]
async fn edit_saves_notes_from_the_form() {
    let pool = pool();
    let mut form = strength_form("Squat", "5", "5", "100");
    form.notes = "old".into();
    let stored = cmd_strength_log(&pool, form).await.unwrap();

    let mut edit = strength_form("Squat", "5", "5", "102.5");
    edit.notes = "new note".into();
    let edited = cmd_strength_edit(&pool, stored.id, edit).await.unwrap();

    assert_eq!(edited.weight, 102.5);
    assert_eq!(edited.notes.as_deref(), Some("new note"));
    assert_eq!(strength_get(&pool, stored.id).unwrap(), Some(edited));
}

#[tokio::test]
async fn edit_with_blank_notes_clears_them() {
    let pool = pool();
    let mut form = cardio_form("Running", "30", "5");
    form.notes = "windy".into();
    let stored = cmd_cardio_log(&pool, form).await.unwrap();

    let edited = cmd_cardio_edit(&pool, stored.id, cardio_form("Running", "32", "5"))
        .await
        .unwrap();

    assert_eq!(edited.notes, None);
    assert_eq!(cardio_get(&pool, stored.id).unwrap().unwrap().notes, None);
}

#[tokio::test]
async fn edit_and_delete_missing_entry_are_not_found() {
    let pool = pool();
    let err = cmd_cardio_edit(&pool, 9, cardio_form("Running", "30", "5"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(cmd_strength_delete(&pool, 9).await.unwrap_err().code(), "NOT_FOUND");
}

#[tokio::test]
async fn delete_removes_entry() {
    let pool = pool();
    let stored = cmd_cardio_log(&pool, cardio_form("Cycling", "60", "20")).await.unwrap();
    cmd_cardio_delete(&pool, stored.id).await.unwrap();
    assert!(cardio_get(&pool, stored.id).unwrap().is_none());
}

// ══════════════════════════════════════════════════════════
//  notes editor
// ══════════════════════════════════════════════════════════

#[tokio::test]
async fn notes_load_existing_entry() {
    let pool = pool();
    let mut form = cardio_form("Swimming", "40", "1.5");
    form.notes = "lane 3".into();
    let stored = cmd_cardio_log(&pool, form).await.unwrap();

    let view = cmd_notes_load(&pool, LogKind::Cardio, stored.id).await.unwrap();
    assert!(view.found);
    assert_eq!(view.title, "Swimming");
    assert_eq!(view.text, "lane 3");
}

#[tokio::test]
async fn notes_load_missing_entry_uses_placeholder() {
    let pool = pool();
    let view = cmd_notes_load(&pool, LogKind::Strength, 404).await.unwrap();
    assert!(!view.found);
    assert_eq!(view.title, "Strength Exercise");
    assert_eq!(view.text, "");
}

#[tokio::test]
async fn notes_save_on_missing_entry_is_silent() {
    let pool = pool();
    let saved = cmd_notes_save(
        &pool,
        NotesSaveReq {
            kind: LogKind::Cardio,
            id: 404,
            text: "lost".into(),
        },
    )
    .await
    .unwrap();
    assert!(!saved);
}

#[tokio::test]
async fn blank_notes_clear_the_field() {
    let pool = pool();
    let mut form = strength_form("Squat", "5", "5", "100");
    form.notes = "old".into();
    let stored = cmd_strength_log(&pool, form).await.unwrap();

    let saved = cmd_notes_save(
        &pool,
        NotesSaveReq {
            kind: LogKind::Strength,
            id: stored.id,
            text: "   ".into(),
        },
    )
    .await
    .unwrap();
    assert!(saved);
    assert_eq!(strength_get(&pool, stored.id).unwrap().unwrap().notes, None);
}

// ══════════════════════════════════════════════════════════
//  catalog and goal
// ══════════════════════════════════════════════════════════

#[tokio::test]
async fn master_add_rename_remove() {
    let pool = pool();
    let added = cmd_master_add(
        &pool,
        MasterAddReq {
            kind: MasterKind::Strength,
            name: "Curl".into(),
        },
    )
    .await
    .unwrap();

    let renamed = cmd_master_rename(
        &pool,
        MasterRenameReq {
            kind: MasterKind::Strength,
            id: added.id,
            name: "Hammer Curl".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Hammer Curl");

    cmd_master_remove(&pool, MasterKind::Strength, added.id).await.unwrap();
    assert!(master_list(&pool, MasterKind::Strength).unwrap().is_empty());
}

#[test]
fn master_request_uses_upper_case_kind() {
    let req: MasterAddReq = serde_json::from_str(r#"{"kind":"CARDIO","name":"Hiking"}"#).unwrap();
    assert_eq!(req.kind, MasterKind::Cardio);
}

#[tokio::test]
async fn goal_text_is_filtered_to_digits() {
    let pool = pool();
    let goal = cmd_goal_set(&pool, "4x".into()).await.unwrap();
    assert_eq!(goal.goal_per_week, 4);
}

#[tokio::test]
async fn unusable_goal_text_keeps_current_goal() {
    let pool = pool();
    cmd_goal_set(&pool, "5".into()).await.unwrap();

    for input in ["", "abc", "0"] {
        let goal = cmd_goal_set(&pool, input.into()).await.unwrap();
        assert_eq!(goal.goal_per_week, 5, "input {:?}", input);
    }
}
