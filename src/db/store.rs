use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{models::DiaryRecord, AppResult};

pub const SAVE_FAILED_MESSAGE: &str = "Saving failed, please try again.";

/// Result of a write against the diary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    /// Exactly `expected` affected rows counts as success.
    pub fn from_rows_affected(rows: u64, expected: u64) -> Self {
        if rows == expected {
            Outcome::Success
        } else {
            tracing::warn!(rows, expected, "Unexpected number of rows affected");
            Outcome::Failure(SAVE_FAILED_MESSAGE.to_string())
        }
    }

    pub fn from_db_error(err: &sqlx::Error) -> Self {
        tracing::error!(error = %err, "Diary write failed");
        Outcome::Failure(format!("Database error: {}", err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Persistence for diary records, one row per date.
///
/// Writes never return an error: storage faults are folded into
/// [`Outcome::Failure`]. Reads surface faults as [`crate::AppError`].
#[async_trait]
pub trait DiaryStore: Send + Sync {
    /// Inserts the record, or overwrites every non-key column of the
    /// existing row for the same date, in one atomic statement.
    async fn upsert(&self, record: &DiaryRecord) -> Outcome;

    /// Upserts all records in a single transaction.
    async fn upsert_many(&self, records: &[DiaryRecord]) -> Outcome;

    async fn fetch_by_date(&self, date: NaiveDate) -> AppResult<Option<DiaryRecord>>;

    /// Records with `start <= date <= end`, newest first.
    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DiaryRecord>>;

    async fn fetch_oldest_date(&self) -> AppResult<Option<NaiveDate>>;

    /// Releases held resources. Called once at shutdown.
    async fn close(&self) {}
}
