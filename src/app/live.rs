//! Live queries: a subscription re-runs its query whenever one of the tables
//! it reads from changes and publishes the full result set.

use super::cardio::{cardio_list_all, cardio_list_for_date};
use super::dashboard::weekly_progress_for;
use super::goal::goal_get;
use super::master::master_list;
use super::strength::{strength_list_all, strength_list_for_date};
use crate::domain::{
    CardioExercise, MasterExercise, MasterKind, SortOrder, StrengthExercise, WeeklyGoal,
    WeeklyProgress,
};
use crate::error::AppError;
use crate::infra::{run_blocking, DbPool, Table};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to a running live query. Dropping it cancels the query.
pub struct Subscription<T> {
    rx: watch::Receiver<Option<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone> Subscription<T> {
    /// Wait for the next result set. The first call yields the initial query.
    /// Returns `None` once the subscription has stopped.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }

    /// Most recent result set, if the first query has completed.
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn subscribe<T, F>(pool: &Arc<DbPool>, tables: Vec<Table>, query: F) -> Subscription<T>
where
    T: Send + Sync + 'static,
    F: Fn(&DbPool) -> Result<T, AppError> + Send + Sync + 'static,
{
    // Subscribe before the first query so no write slips in between.
    let mut changes = pool.subscribe_changes();
    let (tx, rx) = watch::channel(None);
    let pool = Arc::clone(pool);
    let query = Arc::new(query);

    let task = tokio::spawn(async move {
        loop {
            let q = Arc::clone(&query);
            match run_blocking(&pool, move |p| q(p)).await {
                Ok(value) => {
                    if tx.send(Some(value)).is_err() {
                        return;
                    }
                }
                Err(e) => log::warn!("live query on {:?} failed: {}", tables, e),
            }

            loop {
                match changes.recv().await {
                    Ok(table) if tables.contains(&table) => break,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        log::debug!("live query lagged by {} changes; refreshing", skipped);
                        break;
                    }
                    Err(RecvError::Closed) => return,
                }
            }

            // A multi-row write arrives as a burst; refresh once for all of it.
            loop {
                match changes.try_recv() {
                    Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Closed) => return,
                }
            }
        }
    });

    Subscription { rx, task }
}

fn master_table(kind: MasterKind) -> Table {
    match kind {
        MasterKind::Strength => Table::StrengthMasterExercises,
        MasterKind::Cardio => Table::CardioMasterExercises,
    }
}

pub fn watch_strength_for_date(
    pool: &Arc<DbPool>,
    date: NaiveDate,
) -> Subscription<Vec<StrengthExercise>> {
    subscribe(pool, vec![Table::StrengthExercises], move |p| {
        strength_list_for_date(p, date)
    })
}

pub fn watch_cardio_for_date(pool: &Arc<DbPool>, date: NaiveDate) -> Subscription<Vec<CardioExercise>> {
    subscribe(pool, vec![Table::CardioExercises], move |p| {
        cardio_list_for_date(p, date)
    })
}

pub fn watch_strength_all(pool: &Arc<DbPool>, order: SortOrder) -> Subscription<Vec<StrengthExercise>> {
    subscribe(pool, vec![Table::StrengthExercises], move |p| {
        strength_list_all(p, order)
    })
}

pub fn watch_cardio_all(pool: &Arc<DbPool>, order: SortOrder) -> Subscription<Vec<CardioExercise>> {
    subscribe(pool, vec![Table::CardioExercises], move |p| {
        cardio_list_all(p, order)
    })
}

pub fn watch_master_list(pool: &Arc<DbPool>, kind: MasterKind) -> Subscription<Vec<MasterExercise>> {
    subscribe(pool, vec![master_table(kind)], move |p| master_list(p, kind))
}

pub fn watch_weekly_goal(pool: &Arc<DbPool>) -> Subscription<Option<WeeklyGoal>> {
    subscribe(pool, vec![Table::WeeklyGoal], goal_get)
}

/// Progress for the week containing `today`; refreshes on any log or goal change.
pub fn watch_weekly_progress(pool: &Arc<DbPool>, today: NaiveDate) -> Subscription<WeeklyProgress> {
    subscribe(
        pool,
        vec![Table::StrengthExercises, Table::CardioExercises, Table::WeeklyGoal],
        move |p| weekly_progress_for(p, today),
    )
}
