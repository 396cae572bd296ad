//! Master exercise catalogs (strength and cardio).
//!
//! Both catalogs share one schema and differ only in table and in how a
//! duplicate name is handled on insert; see [`MasterKind::insert_policy`].

use crate::domain::{InsertPolicy, MasterExercise, MasterKind};
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

fn clean_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("exercise name is required".into()));
    }
    Ok(name.to_string())
}

fn find_by_name(
    conn: &Connection,
    kind: MasterKind,
    name: &str,
) -> Result<Option<MasterExercise>, AppError> {
    let sql = format!("SELECT id, name FROM {} WHERE name = ?1", kind.table());
    let found = conn
        .query_row(&sql, params![name], |r| {
            Ok(MasterExercise {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })
        .optional()?;
    Ok(found)
}

/// Add a name to the catalog and return the row that now holds it.
///
/// Strength keeps an existing row with the same name; cardio replaces it,
/// so the returned id can differ from the previous one.
pub fn master_insert(pool: &DbPool, kind: MasterKind, name: &str) -> Result<MasterExercise, AppError> {
    let name = clean_name(name)?;
    let conn = get_connection(pool);
    let verb = match kind.insert_policy() {
        InsertPolicy::Ignore => "INSERT OR IGNORE",
        InsertPolicy::Replace => "INSERT OR REPLACE",
    };
    let rows = conn.execute(
        &format!("{} INTO {} (name) VALUES (?1)", verb, kind.table()),
        params![&name],
    )?;
    if rows == 0 {
        log::debug!("{} master already has {:?}", kind.as_str(), name);
    }
    find_by_name(&conn, kind, &name)?
        .ok_or_else(|| AppError::NotFound(format!("{} master exercise {}", kind.as_str(), name)))
}

pub fn master_update(
    pool: &DbPool,
    kind: MasterKind,
    record: MasterExercise,
) -> Result<MasterExercise, AppError> {
    let name = clean_name(&record.name)?;
    let conn = get_connection(pool);
    let rows = conn
        .execute(
            &format!("UPDATE {} SET name = ?1 WHERE id = ?2", kind.table()),
            params![&name, record.id],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => {
                AppError::Conflict(format!("{} already in the {} list", name, kind.as_str()))
            }
            _ => AppError::from(e),
        })?;
    if rows == 0 {
        return Err(AppError::NotFound(format!(
            "{} master exercise {}",
            kind.as_str(),
            record.id
        )));
    }
    Ok(MasterExercise { id: record.id, name })
}

pub fn master_delete(pool: &DbPool, kind: MasterKind, id: i64) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let rows = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1", kind.table()),
        params![id],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("{} master exercise {}", kind.as_str(), id)));
    }
    Ok(())
}

/// The catalog ordered by name.
pub fn master_list(pool: &DbPool, kind: MasterKind) -> Result<Vec<MasterExercise>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn.prepare(&format!("SELECT id, name FROM {} ORDER BY name ASC", kind.table()))?;
    let rows = stmt.query_map([], |r| {
        Ok(MasterExercise {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn master_get_by_name(
    pool: &DbPool,
    kind: MasterKind,
    name: &str,
) -> Result<Option<MasterExercise>, AppError> {
    let conn = get_connection(pool);
    find_by_name(&conn, kind, name.trim())
}
