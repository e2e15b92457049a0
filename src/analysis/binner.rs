use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::{models::DiaryRecord, AppError, AppResult};

/// Width of one analysis bucket, in whole days. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketWidth(NonZeroU32);

impl BucketWidth {
    pub const DAILY: BucketWidth = BucketWidth(NonZeroU32::MIN);

    pub fn new(days: i64) -> AppResult<Self> {
        u32::try_from(days)
            .ok()
            .and_then(NonZeroU32::new)
            .map(BucketWidth)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "bucket width must be a positive number of days, got {}",
                    days
                ))
            })
    }

    pub fn days(self) -> u32 {
        self.0.get()
    }

    pub fn is_daily(self) -> bool {
        self == Self::DAILY
    }
}

impl Default for BucketWidth {
    fn default() -> Self {
        BucketWidth(NonZeroU32::MIN.saturating_add(2))
    }
}

impl fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days() {
            1 => write!(f, "1day"),
            n => write!(f, "{}days", n),
        }
    }
}

/// Parses interval labels such as `1day`, `3days` or `7days`.
impl FromStr for BucketWidth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("days")
            .or_else(|| trimmed.strip_suffix("day"))
            .unwrap_or(trimmed)
            .trim();

        let days: i64 = number
            .parse()
            .map_err(|_| AppError::Validation(format!("invalid interval '{}'", s)))?;

        BucketWidth::new(days)
    }
}

/// A diary record tagged with the bucket it falls into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BinnedRecord {
    #[serde(flatten)]
    pub record: DiaryRecord,
    /// Zero-based bucket index counted from the earliest date
    pub date_interval: i64,
}

/// Index of the bucket `date` lands in when buckets start at `reference`.
pub fn bucket_index(reference: NaiveDate, date: NaiveDate, width: BucketWidth) -> i64 {
    let offset = (date - reference).num_days();
    offset.div_euclid(i64::from(width.days()))
}

/// Assigns every record a bucket index relative to the earliest date.
/// Input order is preserved; an empty input gives an empty output.
pub fn bin(records: Vec<DiaryRecord>, width: BucketWidth) -> Vec<BinnedRecord> {
    let Some(reference) = records.iter().map(|r| r.date).min() else {
        return Vec::new();
    };

    records
        .into_iter()
        .map(|record| {
            let date_interval = bucket_index(reference, record.date, width);
            BinnedRecord {
                record,
                date_interval,
            }
        })
        .collect()
}
