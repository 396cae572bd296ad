//! Dashboard and calendar read models built on the two logs.

use super::cardio::{cardio_list_all, cardio_list_between};
use super::goal::goal_current;
use super::strength::{strength_list_all, strength_list_between};
use crate::domain::{
    chart_series, week_bounds, weekly_progress, workout_days, CardioMetric, ChartSeries, SortOrder,
    StrengthMetric, WeeklyProgress,
};
use crate::error::AppError;
use crate::infra::DbPool;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;

pub fn weekly_progress_for(pool: &DbPool, today: NaiveDate) -> Result<WeeklyProgress, AppError> {
    let (start, end) = week_bounds(today);
    let strength = strength_list_between(pool, start, end)?;
    let cardio = cardio_list_between(pool, start, end)?;
    let goal = goal_current(pool)?;
    Ok(weekly_progress(
        today,
        strength.iter().map(|e| e.date),
        cardio.iter().map(|e| e.date),
        goal,
    ))
}

pub fn strength_chart(pool: &DbPool, exercise: &str, metric: StrengthMetric) -> Result<ChartSeries, AppError> {
    let logs = strength_list_all(pool, SortOrder::Ascending)?;
    Ok(chart_series(&logs, exercise, metric))
}

pub fn cardio_chart(pool: &DbPool, exercise: &str, metric: CardioMetric) -> Result<ChartSeries, AppError> {
    let logs = cardio_list_all(pool, SortOrder::Ascending)?;
    Ok(chart_series(&logs, exercise, metric))
}

/// Days of the given month that have at least one logged workout.
pub fn workout_days_in_month(pool: &DbPool, year: i32, month: u32) -> Result<BTreeSet<NaiveDate>, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("invalid month {}-{}", year, month)))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::Validation(format!("month out of range {}-{}", year, month)))?;
    let last = next - Duration::days(1);
    debug_assert_eq!(last.month(), first.month());

    let strength = strength_list_between(pool, first, last)?;
    let cardio = cardio_list_between(pool, first, last)?;
    Ok(workout_days(
        strength.iter().map(|e| e.date),
        cardio.iter().map(|e| e.date),
    ))
}
