use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::{plots::PlotData, plots::PlotLabels, BinnedRecord};

/// Suggested analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisDefaults {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Interval label, e.g. `3days`
    pub interval: String,
}

/// Binned records and chart sources for one date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub interval: String,
    pub bucket_width_days: u32,
    /// True for one-day buckets, which are drawn as per-day series
    pub daily: bool,
    pub records: Vec<BinnedRecord>,
    pub labels: PlotLabels,
    pub plots: PlotData,
}
