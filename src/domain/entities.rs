//! Journal record shapes and the master-list kinds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The weekly goal lives in a single row with this id.
pub const WEEKLY_GOAL_ID: i64 = 0;
pub const DEFAULT_GOAL_PER_WEEK: i64 = 3;

/// One logged set-group on a date. `id == 0` means "not stored yet".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthExercise {
    pub id: i64,
    pub date: NaiveDate,
    pub exercise: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
}

impl StrengthExercise {
    pub fn new(date: NaiveDate, exercise: impl Into<String>, sets: i64, reps: i64, weight: f64) -> Self {
        Self {
            id: 0,
            date,
            exercise: exercise.into(),
            sets,
            reps,
            weight,
            notes: None,
        }
    }

    /// Total load moved: sets x reps x weight.
    pub fn volume(&self) -> f64 {
        self.sets as f64 * self.reps as f64 * self.weight
    }
}

/// One logged cardio session. Duration is in minutes, distance in km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioExercise {
    pub id: i64,
    pub date: NaiveDate,
    pub exercise: String,
    pub duration: i64,
    pub distance: f64,
    pub notes: Option<String>,
}

impl CardioExercise {
    pub fn new(date: NaiveDate, exercise: impl Into<String>, duration: i64, distance: f64) -> Self {
        Self {
            id: 0,
            date,
            exercise: exercise.into(),
            duration,
            distance,
            notes: None,
        }
    }

    /// Minutes per km; zero when no distance was recorded.
    pub fn pace(&self) -> f64 {
        if self.distance > 0.0 {
            self.duration as f64 / self.distance
        } else {
            0.0
        }
    }
}

/// A selectable exercise name in one of the master catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterExercise {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub id: i64,
    pub goal_per_week: i64,
}

impl Default for WeeklyGoal {
    fn default() -> Self {
        Self {
            id: WEEKLY_GOAL_ID,
            goal_per_week: DEFAULT_GOAL_PER_WEEK,
        }
    }
}

/// Which master catalog an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasterKind {
    Strength,
    Cardio,
}

/// How a master catalog reacts to a duplicate name on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Keep the existing row, drop the new one.
    Ignore,
    /// Delete the existing row and insert the new one under a fresh id.
    Replace,
}

impl MasterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "STRENGTH",
            Self::Cardio => "CARDIO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "STRENGTH" => Some(Self::Strength),
            "CARDIO" => Some(Self::Cardio),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Strength, Self::Cardio]
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Strength => "strength_master_exercises",
            Self::Cardio => "cardio_master_exercises",
        }
    }

    pub fn insert_policy(&self) -> InsertPolicy {
        match self {
            Self::Strength => InsertPolicy::Ignore,
            Self::Cardio => InsertPolicy::Replace,
        }
    }

    pub fn log_kind(&self) -> LogKind {
        match self {
            Self::Strength => LogKind::Strength,
            Self::Cardio => LogKind::Cardio,
        }
    }
}

/// Which workout log a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    Strength,
    Cardio,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "STRENGTH",
            Self::Cardio => "CARDIO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "STRENGTH" => Some(Self::Strength),
            "CARDIO" => Some(Self::Cardio),
            _ => None,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Strength => "strength_exercises",
            Self::Cardio => "cardio_exercises",
        }
    }

    /// Title shown by the notes editor when the record is gone.
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            Self::Strength => "Strength Exercise",
            Self::Cardio => "Cardio Exercise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_kinds_have_distinct_policies() {
        assert_eq!(MasterKind::Strength.insert_policy(), InsertPolicy::Ignore);
        assert_eq!(MasterKind::Cardio.insert_policy(), InsertPolicy::Replace);
        assert_ne!(MasterKind::Strength.table(), MasterKind::Cardio.table());
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in MasterKind::all() {
            assert_eq!(MasterKind::from_str(kind.as_str()), Some(*kind));
        }
        assert_eq!(LogKind::from_str("CARDIO"), Some(LogKind::Cardio));
        assert_eq!(LogKind::from_str("cardio"), None);
    }

    #[test]
    fn pace_is_zero_without_distance() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(CardioExercise::new(date, "Running", 30, 0.0).pace(), 0.0);
        assert_eq!(CardioExercise::new(date, "Running", 30, 6.0).pace(), 5.0);
    }

    #[test]
    fn volume_multiplies_sets_reps_weight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(StrengthExercise::new(date, "Squat", 5, 5, 100.0).volume(), 2500.0);
    }

    #[test]
    fn volume_of_huge_counts_does_not_overflow() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let e = StrengthExercise::new(date, "Squat", 4_000_000_000, 4_000_000_000, 1.0);
        assert_eq!(e.volume(), 1.6e19);
    }
}
