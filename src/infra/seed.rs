//! Default catalog and goal for a fresh database.

use super::db::{get_connection, DbPool};
use crate::domain::{MasterKind, DEFAULT_GOAL_PER_WEEK, WEEKLY_GOAL_ID};
use crate::error::AppError;
use rusqlite::{params, OptionalExtension, Transaction};
use std::sync::Arc;
use tokio::task::JoinHandle;

const SEEDED_KEY: &str = "seeded";

pub const STRENGTH_DEFAULTS: [&str; 8] = [
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Barbell Row",
    "Lat Pulldown",
    "Bicep Curl",
    "Tricep Pushdown",
];

pub const CARDIO_DEFAULTS: [&str; 8] = [
    "Running",
    "Cycling",
    "Rowing",
    "Jump Rope",
    "Swimming",
    "Elliptical",
    "Stair Climber",
    "Walking",
];

/// What a seeding pass actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub strength_inserted: usize,
    pub cardio_inserted: usize,
    pub goal_inserted: bool,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Write the first-creation defaults. Runs once per database: after the
/// first pass an `app_meta` marker makes every later call a no-op, so a
/// catalog the user emptied stays empty.
pub fn seed_defaults(pool: &DbPool) -> Result<SeedReport, AppError> {
    let mut conn = get_connection(pool);
    let tx = conn.transaction()?;

    let seeded: Option<String> = tx
        .query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![SEEDED_KEY],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(at) = seeded {
        log::debug!("defaults already seeded at {}", at);
        return Ok(SeedReport::default());
    }

    let report = SeedReport {
        strength_inserted: seed_catalog(&tx, MasterKind::Strength, &STRENGTH_DEFAULTS)?,
        cardio_inserted: seed_catalog(&tx, MasterKind::Cardio, &CARDIO_DEFAULTS)?,
        goal_inserted: tx.execute(
            "INSERT OR IGNORE INTO weekly_goal (id, goal_per_week) VALUES (?1, ?2)",
            params![WEEKLY_GOAL_ID, DEFAULT_GOAL_PER_WEEK],
        )? > 0,
    };
    tx.execute(
        "INSERT INTO app_meta (key, value) VALUES (?1, datetime('now'))",
        params![SEEDED_KEY],
    )?;

    tx.commit()?;
    if !report.is_noop() {
        log::info!(
            "seeded defaults: {} strength, {} cardio, goal {}",
            report.strength_inserted,
            report.cardio_inserted,
            report.goal_inserted
        );
    }
    Ok(report)
}

fn seed_catalog(tx: &Transaction<'_>, kind: MasterKind, names: &[&str]) -> Result<usize, AppError> {
    let table = kind.table();
    let count: i64 = tx.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
    if count > 0 {
        return Ok(0);
    }
    let mut stmt = tx.prepare(&format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", table))?;
    let mut inserted = 0;
    for name in names {
        inserted += stmt.execute([name])?;
    }
    Ok(inserted)
}

/// Seed on the blocking pool. Dropping the handle leaves seeding running.
pub fn spawn_seed(pool: Arc<DbPool>) -> JoinHandle<Result<SeedReport, AppError>> {
    tokio::task::spawn_blocking(move || {
        seed_defaults(&pool).map_err(|e| {
            log::error!("seeding defaults failed: {}", e);
            e
        })
    })
}
