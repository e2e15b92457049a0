use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{AppError, AppResult};

pub const SLEEP_MAX_HOURS: f64 = 12.0;
pub const BODYBATTERY_MAX: i32 = 100;
pub const GRADE_MAX: i32 = 6;

/// One day of tracked wellbeing metrics, keyed by `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DiaryRecord {
    pub date: NaiveDate,
    /// Difficulty of each completed activity (1 = somewhat, 3 = very strenuous)
    pub tasks: Vec<i32>,
    /// Hours slept
    pub sleep: f64,
    pub bodybattery_min: i32,
    pub bodybattery_max: i32,
    pub steps: i32,
    /// School grade, 0 is best
    pub body: i32,
    /// School grade, 0 is best
    pub psyche: i32,
    pub dizzy: bool,
    pub comment: String,
}

impl DiaryRecord {
    /// The values a blank form starts with for `date`.
    pub fn defaults_for(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
            sleep: 6.0,
            bodybattery_min: 50,
            bodybattery_max: 50,
            steps: 0,
            body: 3,
            psyche: 3,
            dizzy: false,
            comment: String::new(),
        }
    }

    /// Checks the value ranges the entry widgets allow.
    ///
    /// Task values and the ordering of the two body battery readings are
    /// deliberately left unchecked.
    pub fn validate_bounds(&self) -> AppResult<()> {
        if !(0.0..=SLEEP_MAX_HOURS).contains(&self.sleep) || (self.sleep * 2.0).fract() != 0.0 {
            return Err(AppError::Validation(format!(
                "sleep must be between 0 and {} hours in steps of 0.5, got {}",
                SLEEP_MAX_HOURS, self.sleep
            )));
        }

        for (name, value) in [
            ("bodybattery_min", self.bodybattery_min),
            ("bodybattery_max", self.bodybattery_max),
        ] {
            if !(0..=BODYBATTERY_MAX).contains(&value) {
                return Err(AppError::Validation(format!(
                    "{} must be between 0 and {}, got {}",
                    name, BODYBATTERY_MAX, value
                )));
            }
        }

        if self.steps < 0 {
            return Err(AppError::Validation(format!(
                "steps must not be negative, got {}",
                self.steps
            )));
        }

        for (name, value) in [("body", self.body), ("psyche", self.psyche)] {
            if !(0..=GRADE_MAX).contains(&value) {
                return Err(AppError::Validation(format!(
                    "{} must be between 0 and {}, got {}",
                    name, GRADE_MAX, value
                )));
            }
        }

        Ok(())
    }
}
