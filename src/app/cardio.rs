//! Cardio log use cases.

use crate::domain::convert::date_to_sql;
use crate::domain::{SortOrder, CardioExercise};
use crate::error::AppError;
use crate::infra::{get_connection, read_date, DbPool};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, date, exercise, duration, distance, notes";

fn from_row(row: &Row<'_>) -> rusqlite::Result<CardioExercise> {
    Ok(CardioExercise {
        id: row.get(0)?,
        date: read_date(row, 1)?,
        exercise: row.get(2)?,
        duration: row.get(3)?,
        distance: row.get(4)?,
        notes: row.get(5)?,
    })
}

/// Store a new entry. `id == 0` gets a generated id; any other id is kept.
pub fn cardio_insert(pool: &DbPool, record: CardioExercise) -> Result<CardioExercise, AppError> {
    let conn = get_connection(pool);
    let date = date_to_sql(record.date);
    let id = if record.id == 0 {
        conn.execute(
            "INSERT INTO cardio_exercises (date, exercise, duration, distance, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![date, record.exercise, record.duration, record.distance, record.notes],
        )?;
        conn.last_insert_rowid()
    } else {
        conn.execute(
            "INSERT INTO cardio_exercises (id, date, exercise, duration, distance, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![record.id, date, record.exercise, record.duration, record.distance, record.notes],
        )?;
        record.id
    };
    log::debug!("cardio entry {} logged for {}", id, date);
    Ok(CardioExercise { id, ..record })
}

pub fn cardio_update(pool: &DbPool, record: CardioExercise) -> Result<CardioExercise, AppError> {
    let conn = get_connection(pool);
    let rows = conn.execute(
        "UPDATE cardio_exercises SET date = ?1, exercise = ?2, duration = ?3, distance = ?4, notes = ?5 WHERE id = ?6",
        params![
            date_to_sql(record.date),
            record.exercise,
            record.duration,
            record.distance,
            record.notes,
            record.id
        ],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("cardio exercise {}", record.id)));
    }
    Ok(record)
}

pub fn cardio_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let rows = conn.execute("DELETE FROM cardio_exercises WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("cardio exercise {}", id)));
    }
    Ok(())
}

pub fn cardio_get(pool: &DbPool, id: i64) -> Result<Option<CardioExercise>, AppError> {
    let conn = get_connection(pool);
    get_by_id(&conn, id)
}

fn get_by_id(conn: &Connection, id: i64) -> Result<Option<CardioExercise>, AppError> {
    let sql = format!("SELECT {} FROM cardio_exercises WHERE id = ?1 LIMIT 1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], from_row).optional()?)
}

pub fn cardio_list_for_date(pool: &DbPool, date: NaiveDate) -> Result<Vec<CardioExercise>, AppError> {
    let conn = get_connection(pool);
    let sql = format!("SELECT {} FROM cardio_exercises WHERE date = ?1 ORDER BY id", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date_to_sql(date)], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn cardio_list_between(
    pool: &DbPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CardioExercise>, AppError> {
    let conn = get_connection(pool);
    let sql = format!(
        "SELECT {} FROM cardio_exercises WHERE date >= ?1 AND date <= ?2 ORDER BY date, id",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date_to_sql(start), date_to_sql(end)], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn cardio_list_all(pool: &DbPool, order: SortOrder) -> Result<Vec<CardioExercise>, AppError> {
    let conn = get_connection(pool);
    let sql = format!(
        "SELECT {} FROM cardio_exercises ORDER BY date {dir}, id {dir}",
        COLUMNS,
        dir = order.sql()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn cardio_exercise_names(pool: &DbPool) -> Result<Vec<String>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn.prepare("SELECT DISTINCT exercise FROM cardio_exercises ORDER BY exercise")?;
    let rows = stmt.query_map([], |r| r.get(0))?;
    Ok(rows.collect::<Result<Vec<String>, _>>()?)
}

/// Replace the notes of an entry. A missing entry is left alone and yields `None`.
pub fn cardio_save_notes(
    pool: &DbPool,
    id: i64,
    notes: Option<String>,
) -> Result<Option<CardioExercise>, AppError> {
    let conn = get_connection(pool);
    let Some(existing) = get_by_id(&conn, id)? else {
        return Ok(None);
    };
    conn.execute(
        "UPDATE cardio_exercises SET notes = ?1 WHERE id = ?2",
        params![notes, id],
    )?;
    Ok(Some(CardioExercise { notes, ..existing }))
}
