//! Strength log use cases: insert, update, delete, date/range/all queries, notes.

use crate::domain::convert::date_to_sql;
use crate::domain::{SortOrder, StrengthExercise};
use crate::error::AppError;
use crate::infra::{get_connection, read_date, DbPool};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, date, exercise, sets, reps, weight, notes";

fn from_row(row: &Row<'_>) -> rusqlite::Result<StrengthExercise> {
    Ok(StrengthExercise {
        id: row.get(0)?,
        date: read_date(row, 1)?,
        exercise: row.get(2)?,
        sets: row.get(3)?,
        reps: row.get(4)?,
        weight: row.get(5)?,
        notes: row.get(6)?,
    })
}

/// Store a new entry. `id == 0` gets a generated id; any other id is kept.
pub fn strength_insert(pool: &DbPool, record: StrengthExercise) -> Result<StrengthExercise, AppError> {
    let conn = get_connection(pool);
    let date = date_to_sql(record.date);
    let id = if record.id == 0 {
        conn.execute(
            "INSERT INTO strength_exercises (date, exercise, sets, reps, weight, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![date, record.exercise, record.sets, record.reps, record.weight, record.notes],
        )?;
        conn.last_insert_rowid()
    } else {
        conn.execute(
            "INSERT INTO strength_exercises (id, date, exercise, sets, reps, weight, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![record.id, date, record.exercise, record.sets, record.reps, record.weight, record.notes],
        )?;
        record.id
    };
    log::debug!("strength entry {} logged for {}", id, date);
    Ok(StrengthExercise { id, ..record })
}

/// Overwrite every field of the row with `record.id`.
pub fn strength_update(pool: &DbPool, record: StrengthExercise) -> Result<StrengthExercise, AppError> {
    let conn = get_connection(pool);
    let rows = conn.execute(
        "UPDATE strength_exercises SET date = ?1, exercise = ?2, sets = ?3, reps = ?4, weight = ?5, notes = ?6 WHERE id = ?7",
        params![
            date_to_sql(record.date),
            record.exercise,
            record.sets,
            record.reps,
            record.weight,
            record.notes,
            record.id
        ],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("strength exercise {}", record.id)));
    }
    Ok(record)
}

pub fn strength_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let rows = conn.execute("DELETE FROM strength_exercises WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("strength exercise {}", id)));
    }
    Ok(())
}

pub fn strength_get(pool: &DbPool, id: i64) -> Result<Option<StrengthExercise>, AppError> {
    let conn = get_connection(pool);
    get_by_id(&conn, id)
}

fn get_by_id(conn: &Connection, id: i64) -> Result<Option<StrengthExercise>, AppError> {
    let sql = format!("SELECT {} FROM strength_exercises WHERE id = ?1 LIMIT 1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], from_row).optional()?)
}

pub fn strength_list_for_date(pool: &DbPool, date: NaiveDate) -> Result<Vec<StrengthExercise>, AppError> {
    let conn = get_connection(pool);
    let sql = format!("SELECT {} FROM strength_exercises WHERE date = ?1 ORDER BY id", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date_to_sql(date)], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Every entry between `start` and `end`, both inclusive, oldest first.
pub fn strength_list_between(
    pool: &DbPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<StrengthExercise>, AppError> {
    let conn = get_connection(pool);
    let sql = format!(
        "SELECT {} FROM strength_exercises WHERE date >= ?1 AND date <= ?2 ORDER BY date, id",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date_to_sql(start), date_to_sql(end)], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn strength_list_all(pool: &DbPool, order: SortOrder) -> Result<Vec<StrengthExercise>, AppError> {
    let conn = get_connection(pool);
    let sql = format!(
        "SELECT {} FROM strength_exercises ORDER BY date {dir}, id {dir}",
        COLUMNS,
        dir = order.sql()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Distinct exercise names that appear in the log, alphabetically.
pub fn strength_exercise_names(pool: &DbPool) -> Result<Vec<String>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn.prepare("SELECT DISTINCT exercise FROM strength_exercises ORDER BY exercise")?;
    let rows = stmt.query_map([], |r| r.get(0))?;
    Ok(rows.collect::<Result<Vec<String>, _>>()?)
}

/// Replace the notes of an entry. A missing entry is left alone and yields `None`.
pub fn strength_save_notes(
    pool: &DbPool,
    id: i64,
    notes: Option<String>,
) -> Result<Option<StrengthExercise>, AppError> {
    let conn = get_connection(pool);
    let Some(existing) = get_by_id(&conn, id)? else {
        log::debug!("notes for missing strength entry {} dropped", id);
        return Ok(None);
    };
    conn.execute(
        "UPDATE strength_exercises SET notes = ?1 WHERE id = ?2",
        params![notes, id],
    )?;
    Ok(Some(StrengthExercise { notes, ..existing }))
}
