//! Strength and cardio dialogs.

use crate::app::{
    cardio_delete, cardio_insert, cardio_update, strength_delete, strength_insert,
    strength_update,
};
use crate::domain::convert::{normalize_notes, parse_count, parse_decimal};
use crate::domain::{CardioExercise, StrengthExercise};
use crate::error::AppError;
use crate::infra::{run_blocking, DbPool};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Raw strength dialog fields as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthForm {
    pub date: NaiveDate,
    pub exercise: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub notes: String,
}

/// Raw cardio dialog fields as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioForm {
    pub date: NaiveDate,
    pub exercise: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub notes: String,
}

fn exercise_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("select an exercise".into()));
    }
    Ok(name.to_string())
}

impl StrengthForm {
    pub fn into_record(self, id: i64) -> Result<StrengthExercise, AppError> {
        Ok(StrengthExercise {
            id,
            date: self.date,
            exercise: exercise_name(&self.exercise)?,
            sets: parse_count(&self.sets),
            reps: parse_count(&self.reps),
            weight: parse_decimal(&self.weight),
            notes: normalize_notes(&self.notes),
        })
    }
}

impl CardioForm {
    pub fn into_record(self, id: i64) -> Result<CardioExercise, AppError> {
        Ok(CardioExercise {
            id,
            date: self.date,
            exercise: exercise_name(&self.exercise)?,
            duration: parse_count(&self.duration),
            distance: parse_decimal(&self.distance),
            notes: normalize_notes(&self.notes),
        })
    }
}

pub async fn cmd_strength_log(pool: &Arc<DbPool>, form: StrengthForm) -> Result<StrengthExercise, AppError> {
    let record = form.into_record(0)?;
    run_blocking(pool, move |p| strength_insert(p, record)).await
}

/// Save the edit dialog over the entry with `id`. The dialog is pre-filled
/// from the stored entry, so every field, notes included, is taken from the form.
pub async fn cmd_strength_edit(
    pool: &Arc<DbPool>,
    id: i64,
    form: StrengthForm,
) -> Result<StrengthExercise, AppError> {
    let record = form.into_record(id)?;
    run_blocking(pool, move |p| strength_update(p, record)).await
}

pub async fn cmd_strength_delete(pool: &Arc<DbPool>, id: i64) -> Result<(), AppError> {
    run_blocking(pool, move |p| strength_delete(p, id)).await
}

pub async fn cmd_cardio_log(pool: &Arc<DbPool>, form: CardioForm) -> Result<CardioExercise, AppError> {
    let record = form.into_record(0)?;
    run_blocking(pool, move |p| cardio_insert(p, record)).await
}

pub async fn cmd_cardio_edit(pool: &Arc<DbPool>, id: i64, form: CardioForm) -> Result<CardioExercise, AppError> {
    let record = form.into_record(id)?;
    run_blocking(pool, move |p| cardio_update(p, record)).await
}

pub async fn cmd_cardio_delete(pool: &Arc<DbPool>, id: i64) -> Result<(), AppError> {
    run_blocking(pool, move |p| cardio_delete(p, id)).await
}
