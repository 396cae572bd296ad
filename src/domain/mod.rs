//! Journal records and the pure computations derived from them.

pub mod convert;
pub mod entities;
pub mod progress;

pub use entities::{
    CardioExercise, InsertPolicy, LogKind, MasterExercise, MasterKind, SortOrder,
    StrengthExercise, WeeklyGoal, DEFAULT_GOAL_PER_WEEK, WEEKLY_GOAL_ID,
};
pub use progress::{
    chart_series, week_bounds, weekly_progress, workout_days, CardioMetric, ChartPoint,
    ChartSeries, Charted, StrengthMetric, WeeklyProgress,
};
