pub mod binner;
pub mod plots;

pub use binner::{bin, BinnedRecord, BucketWidth};

use chrono::{Duration, NaiveDate};

use crate::{
    db::DiaryStore,
    models::{AnalysisDefaults, AnalysisReport},
    AppError, AppResult,
};

/// Days looked back when the diary is still empty
pub const FALLBACK_LOOKBACK_DAYS: i64 = 7;

/// Default window: oldest stored record (or a week ago) up to `today`.
pub async fn default_range(store: &dyn DiaryStore, today: NaiveDate) -> AppResult<AnalysisDefaults> {
    let start = store
        .fetch_oldest_date()
        .await?
        .unwrap_or_else(|| today - Duration::days(FALLBACK_LOOKBACK_DAYS));

    Ok(AnalysisDefaults {
        start,
        end: today,
        interval: BucketWidth::default().to_string(),
    })
}

pub fn validate_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::BadRequest(format!(
            "The start date ({}) must not be after the end date ({})",
            start, end
        )));
    }
    Ok(())
}

/// Fetches the range, bins it and prepares the chart sources.
pub async fn build_report(
    store: &dyn DiaryStore,
    start: NaiveDate,
    end: NaiveDate,
    width: BucketWidth,
) -> AppResult<AnalysisReport> {
    validate_range(start, end)?;

    let records = store.fetch_by_date_range(start, end).await?;
    tracing::debug!(%start, %end, %width, count = records.len(), "Building analysis report");

    let binned = bin(records, width);
    let plots = if width.is_daily() {
        plots::PlotData::Daily(plots::daily_plots(&binned))
    } else {
        plots::PlotData::Interval(plots::interval_plots(&binned))
    };

    Ok(AnalysisReport {
        start,
        end,
        interval: width.to_string(),
        bucket_width_days: width.days(),
        daily: width.is_daily(),
        records: binned,
        labels: plots::PlotLabels::default(),
        plots,
    })
}
