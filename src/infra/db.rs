//! SQLite connection, migrations and change notification.

use crate::domain::convert::date_from_sql;
use crate::error::AppError;
use chrono::NaiveDate;
use rusqlite::hooks::Action;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;

const CHANGE_BUS_CAPACITY: usize = 256;

const MIGRATIONS: &[(i32, &str)] = &[
    (1, include_str!("../../migrations/0001_init.sql")),
    (2, include_str!("../../migrations/0002_log_date_indexes.sql")),
    (3, include_str!("../../migrations/0003_app_meta.sql")),
];

/// Latest schema version this build knows how to create.
pub const SCHEMA_VERSION: i32 = MIGRATIONS[MIGRATIONS.len() - 1].0;

/// Journal tables that publish change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    StrengthExercises,
    CardioExercises,
    StrengthMasterExercises,
    CardioMasterExercises,
    WeeklyGoal,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StrengthExercises => "strength_exercises",
            Self::CardioExercises => "cardio_exercises",
            Self::StrengthMasterExercises => "strength_master_exercises",
            Self::CardioMasterExercises => "cardio_master_exercises",
            Self::WeeklyGoal => "weekly_goal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::StrengthExercises,
            Self::CardioExercises,
            Self::StrengthMasterExercises,
            Self::CardioMasterExercises,
            Self::WeeklyGoal,
        ]
    }
}

/// Shared database handle. Build one at startup and hand out `Arc<DbPool>`.
pub struct DbPool {
    conn: Mutex<Connection>,
    changes: broadcast::Sender<Table>,
}

impl DbPool {
    fn new(conn: Connection) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUS_CAPACITY);
        let hook_tx = changes.clone();
        conn.update_hook(Some(move |_: Action, _: &str, table: &str, _: i64| {
            if let Some(table) = Table::from_name(table) {
                // no receivers is fine
                let _ = hook_tx.send(table);
            }
        }));
        Self {
            conn: Mutex::new(conn),
            changes,
        }
    }

    /// Receiver for every row-level change on a journal table.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Table> {
        self.changes.subscribe()
    }

    /// Number of live receivers on the change bus.
    pub fn listener_count(&self) -> usize {
        self.changes.receiver_count()
    }

    /// Publish a change that the update hook cannot see (DROP, schema reset).
    pub fn notify(&self, table: Table) {
        let _ = self.changes.send(table);
    }
}

/// Initialize DB at path, run migrations, return the shared handle.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut conn = Connection::open(db_path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    run_migrations(&mut conn)?;
    log::info!("database ready at {:?} (schema v{})", db_path, SCHEMA_VERSION);
    Ok(DbPool::new(conn))
}

/// In-memory database with the full schema, for tests.
pub fn init_test_db() -> DbPool {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    run_migrations(&mut conn).expect("migrate in-memory db");
    DbPool::new(conn)
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let mut applied = applied_versions(&tx)?;

    // A version we don't know means a newer or foreign schema: rebuild from scratch.
    if let Some(unknown) = applied
        .iter()
        .find(|v| !MIGRATIONS.iter().any(|(known, _)| known == *v))
    {
        log::warn!(
            "schema version {} is not known to this build (latest {}); dropping all tables",
            unknown,
            SCHEMA_VERSION
        );
        drop_all_tables(&tx)?;
        tx.execute(
            "CREATE TABLE schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
            [],
        )?;
        applied.clear();
    }

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // Skip the INSERT into schema_migrations in the script - we do it ourselves
        let statements: Vec<&str> = sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"))
            .collect();
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::debug!("applied migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

fn applied_versions(conn: &Connection) -> Result<Vec<i32>, AppError> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<i32>, _>>()?;
    Ok(versions)
}

fn drop_all_tables(conn: &Connection) -> Result<(), AppError> {
    let names: Vec<String> = {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let rows = stmt.query_map([], |r| r.get(0))?;
        rows.collect::<Result<Vec<_>, _>>()?
    };
    for name in names {
        conn.execute(
            &format!("DROP TABLE IF EXISTS \"{}\"", name.replace('"', "\"\"")),
            [],
        )?;
    }
    Ok(())
}

/// Drop every table and recreate the schema. All journal data is lost.
pub fn reset_database(pool: &DbPool) -> Result<(), AppError> {
    {
        let mut conn = get_connection(pool);
        drop_all_tables(&conn)?;
        run_migrations(&mut conn)?;
    }
    log::warn!("database reset; all journal data dropped");
    for table in Table::all() {
        pool.notify(*table);
    }
    Ok(())
}

/// Highest applied migration version.
pub fn schema_version(pool: &DbPool) -> Result<i32, AppError> {
    let conn = get_connection(pool);
    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |r| r.get(0))?;
    Ok(version.unwrap_or(0))
}

/// Lock the connection. A panic in another holder does not invalidate it.
pub fn get_connection(pool: &DbPool) -> MutexGuard<'_, Connection> {
    pool.conn.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run a synchronous data operation on the blocking pool.
pub async fn run_blocking<T, F>(pool: &Arc<DbPool>, f: F) -> Result<T, AppError>
where
    F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(pool);
    tokio::task::spawn_blocking(move || f(&pool)).await?
}

/// Read a `YYYY-MM-DD` text column.
pub(crate) fn read_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    date_from_sql(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_round_trip() {
        for table in Table::all() {
            assert_eq!(Table::from_name(table.name()), Some(*table));
        }
        assert_eq!(Table::from_name("schema_migrations"), None);
    }

    #[test]
    fn migrations_are_recorded() {
        let pool = init_test_db();
        assert_eq!(schema_version(&pool).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn rerunning_migrations_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO strength_exercises (date, exercise, sets, reps, weight) VALUES ('2024-01-01', 'Squat', 5, 5, 100)",
            [],
        )
        .unwrap();
        run_migrations(&mut conn).unwrap();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM strength_exercises", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn unknown_version_rebuilds_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO cardio_exercises (date, exercise, duration, distance) VALUES ('2024-01-01', 'Running', 30, 5)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO schema_migrations (version) VALUES (99)", [])
            .unwrap();

        run_migrations(&mut conn).unwrap();

        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM cardio_exercises", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
        assert_eq!(applied_versions(&conn).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn upgrade_marks_already_seeded_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
            [],
        )
        .unwrap();
        for (version, sql) in &MIGRATIONS[..2] {
            for stmt in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
                conn.execute(stmt, []).unwrap();
            }
            assert!(applied_versions(&conn).unwrap().contains(version));
        }
        conn.execute("INSERT INTO cardio_master_exercises (name) VALUES ('Running')", [])
            .unwrap();

        run_migrations(&mut conn).unwrap();

        let marked: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_meta WHERE key = 'seeded'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(marked, 1);
    }

    #[test]
    fn fresh_database_is_not_marked_seeded() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        let marked: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_meta", [], |r| r.get(0))
            .unwrap();
        assert_eq!(marked, 0);
    }
}
