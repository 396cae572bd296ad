//! Weekly goal progress, chart series and calendar marks.

use super::convert::date_to_sql;
use super::entities::{CardioExercise, StrengthExercise};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Monday..=Sunday window containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(6))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Distinct days with at least one strength or cardio entry.
    pub workouts: usize,
    pub goal: i64,
    /// `workouts / goal`, clamped to `[0, 1]`.
    pub ratio: f64,
}

impl WeeklyProgress {
    pub fn goal_met(&self) -> bool {
        self.workouts as i64 >= self.goal
    }
}

pub fn weekly_progress<S, C>(today: NaiveDate, strength_dates: S, cardio_dates: C, goal: i64) -> WeeklyProgress
where
    S: IntoIterator<Item = NaiveDate>,
    C: IntoIterator<Item = NaiveDate>,
{
    let (start, end) = week_bounds(today);
    let days: BTreeSet<NaiveDate> = strength_dates
        .into_iter()
        .chain(cardio_dates)
        .filter(|d| *d >= start && *d <= end)
        .collect();

    let goal = goal.max(1);
    let ratio = (days.len() as f64 / goal as f64).clamp(0.0, 1.0);

    WeeklyProgress {
        week_start: start,
        week_end: end,
        workouts: days.len(),
        goal,
        ratio,
    }
}

/// Every date that has at least one entry in either log.
pub fn workout_days<S, C>(strength_dates: S, cardio_dates: C) -> BTreeSet<NaiveDate>
where
    S: IntoIterator<Item = NaiveDate>,
    C: IntoIterator<Item = NaiveDate>,
{
    strength_dates.into_iter().chain(cardio_dates).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrengthMetric {
    Weight,
    Reps,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardioMetric {
    Distance,
    Duration,
    Pace,
}

/// A log entry that can be plotted over time.
pub trait Charted {
    type Metric: Copy;

    fn date(&self) -> NaiveDate;
    fn exercise(&self) -> &str;
    fn metric(&self, metric: Self::Metric) -> f64;
}

impl Charted for StrengthExercise {
    type Metric = StrengthMetric;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn exercise(&self) -> &str {
        &self.exercise
    }

    fn metric(&self, metric: StrengthMetric) -> f64 {
        match metric {
            StrengthMetric::Weight => self.weight,
            StrengthMetric::Reps => self.reps as f64,
            StrengthMetric::Volume => self.volume(),
        }
    }
}

impl Charted for CardioExercise {
    type Metric = CardioMetric;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn exercise(&self) -> &str {
        &self.exercise
    }

    fn metric(&self, metric: CardioMetric) -> f64 {
        match metric {
            CardioMetric::Distance => self.distance,
            CardioMetric::Duration => self.duration as f64,
            CardioMetric::Pace => self.pace(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Points are indexed sequentially; `labels[i]` is the date of point `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub exercise: String,
    pub points: Vec<ChartPoint>,
    pub labels: Vec<String>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn chart_series<T: Charted>(entries: &[T], exercise: &str, metric: T::Metric) -> ChartSeries {
    let mut matching: Vec<&T> = entries.iter().filter(|e| e.exercise() == exercise).collect();
    // stable: same-day entries keep their stored order
    matching.sort_by_key(|e| e.date());

    let points = matching
        .iter()
        .enumerate()
        .map(|(i, e)| ChartPoint {
            x: i as f64,
            y: e.metric(metric),
        })
        .collect();
    let labels = matching.iter().map(|e| date_to_sql(e.date())).collect();

    ChartSeries {
        exercise: exercise.to_string(),
        points,
        labels,
    }
}
