//! Application use cases: one access module per journal entity, plus the
//! dashboard read models and live subscriptions built on top of them.

mod cardio;
mod dashboard;
mod goal;
pub mod live;
mod master;
mod strength;

pub use cardio::{
    cardio_delete, cardio_exercise_names, cardio_get, cardio_insert, cardio_list_all,
    cardio_list_between, cardio_list_for_date, cardio_save_notes, cardio_update,
};
pub use dashboard::{cardio_chart, strength_chart, weekly_progress_for, workout_days_in_month};
pub use goal::{goal_current, goal_get, goal_upsert};
pub use live::{
    watch_cardio_all, watch_cardio_for_date, watch_master_list, watch_strength_all,
    watch_strength_for_date, watch_weekly_goal, watch_weekly_progress, Subscription,
};
pub use master::{master_delete, master_get_by_name, master_insert, master_list, master_update};
pub use strength::{
    strength_delete, strength_exercise_names, strength_get, strength_insert, strength_list_all,
    strength_list_between, strength_list_for_date, strength_save_notes, strength_update,
};
