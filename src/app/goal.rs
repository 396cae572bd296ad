//! Weekly goal singleton.

use crate::domain::{WeeklyGoal, DEFAULT_GOAL_PER_WEEK, WEEKLY_GOAL_ID};
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::{params, OptionalExtension};

pub fn goal_get(pool: &DbPool) -> Result<Option<WeeklyGoal>, AppError> {
    let conn = get_connection(pool);
    let goal = conn
        .query_row(
            "SELECT id, goal_per_week FROM weekly_goal WHERE id = ?1 LIMIT 1",
            params![WEEKLY_GOAL_ID],
            |r| {
                Ok(WeeklyGoal {
                    id: r.get(0)?,
                    goal_per_week: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(goal)
}

/// Stored goal, or the default when none has been set yet.
pub fn goal_current(pool: &DbPool) -> Result<i64, AppError> {
    Ok(goal_get(pool)?
        .map(|g| g.goal_per_week)
        .unwrap_or(DEFAULT_GOAL_PER_WEEK))
}

/// Replace the singleton row.
pub fn goal_upsert(pool: &DbPool, goal_per_week: i64) -> Result<WeeklyGoal, AppError> {
    if goal_per_week < 1 {
        return Err(AppError::Validation(format!(
            "goal_per_week must be at least 1, got {}",
            goal_per_week
        )));
    }
    let conn = get_connection(pool);
    conn.execute(
        "INSERT OR REPLACE INTO weekly_goal (id, goal_per_week) VALUES (?1, ?2)",
        params![WEEKLY_GOAL_ID, goal_per_week],
    )?;
    log::info!("weekly goal set to {}", goal_per_week);
    Ok(WeeklyGoal {
        id: WEEKLY_GOAL_ID,
        goal_per_week,
    })
}
