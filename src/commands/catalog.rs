use crate::app::{goal_current, goal_upsert, master_delete, master_insert, master_update};
use crate::domain::convert::parse_goal;
use crate::domain::{MasterExercise, MasterKind, WeeklyGoal};
use crate::error::AppError;
use crate::infra::{run_blocking, DbPool};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterAddReq {
    pub kind: MasterKind,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterRenameReq {
    pub kind: MasterKind,
    pub id: i64,
    pub name: String,
}

pub async fn cmd_master_add(pool: &Arc<DbPool>, req: MasterAddReq) -> Result<MasterExercise, AppError> {
    run_blocking(pool, move |p| master_insert(p, req.kind, &req.name)).await
}

pub async fn cmd_master_rename(pool: &Arc<DbPool>, req: MasterRenameReq) -> Result<MasterExercise, AppError> {
    run_blocking(pool, move |p| {
        master_update(
            p,
            req.kind,
            MasterExercise {
                id: req.id,
                name: req.name,
            },
        )
    })
    .await
}

pub async fn cmd_master_remove(pool: &Arc<DbPool>, kind: MasterKind, id: i64) -> Result<(), AppError> {
    run_blocking(pool, move |p| master_delete(p, kind, id)).await
}

/// Goal text box. Non-digits are ignored; an empty or zero goal keeps the
/// stored one.
pub async fn cmd_goal_set(pool: &Arc<DbPool>, input: String) -> Result<WeeklyGoal, AppError> {
    run_blocking(pool, move |p| {
        let current = goal_current(p)?;
        goal_upsert(p, parse_goal(&input, current))
    })
    .await
}
