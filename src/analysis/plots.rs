use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::analysis::BinnedRecord;

pub const X_LABEL: &str = "Zeitintervall";

/// Y-axis label per plotted metric
pub const Y_LABELS: [(&str, &str); 6] = [
    ("sleep", "Schlafzeit [h]"),
    ("bodybattery", "Body Battery [%]"),
    ("steps", "Schritte [absolut]"),
    ("body", "Körpergefühl [0-6]"),
    ("psyche", "Psychegefühl [0-6]"),
    ("dizzy", "Schwindel Häufigkeit [absolut]"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl BoxStats {
    /// Five-number summary with linearly interpolated quartiles.
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            count: sorted.len(),
        })
    }
}

// `sorted` must be non-empty and ascending
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BucketBox {
    pub date_interval: i64,
    #[serde(flatten)]
    pub stats: BoxStats,
}

/// Mean and sample standard deviation of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointEstimate {
    pub date_interval: i64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Number of days with (negative count) or without (positive count) dizziness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DizzyCount {
    pub date_interval: i64,
    pub dizzy: bool,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesPoint {
    pub date_interval: i64,
    pub value: f64,
}

/// Sources for the multi-day aggregate charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IntervalPlots {
    pub sleep: Vec<BucketBox>,
    pub steps: Vec<BucketBox>,
    pub body: Vec<BucketBox>,
    pub psyche: Vec<BucketBox>,
    /// Min and max readings pooled per bucket
    pub bodybattery: Vec<BucketBox>,
    pub bodybattery_min_points: Vec<PointEstimate>,
    pub bodybattery_max_points: Vec<PointEstimate>,
    pub bodybattery_min_strip: Vec<SeriesPoint>,
    pub bodybattery_max_strip: Vec<SeriesPoint>,
    pub dizzy: Vec<DizzyCount>,
}

/// Sources for the per-day line and regression charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyPlots {
    pub sleep: Vec<SeriesPoint>,
    pub bodybattery_min: Vec<SeriesPoint>,
    pub bodybattery_max: Vec<SeriesPoint>,
    pub steps: Vec<SeriesPoint>,
    pub body: Vec<SeriesPoint>,
    pub psyche: Vec<SeriesPoint>,
    pub dizzy: Vec<DizzyCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlotData {
    Daily(DailyPlots),
    Interval(IntervalPlots),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlotLabels {
    pub x: String,
    pub y: BTreeMap<String, String>,
}

impl Default for PlotLabels {
    fn default() -> Self {
        Self {
            x: X_LABEL.to_string(),
            y: Y_LABELS
                .iter()
                .map(|(metric, label)| (metric.to_string(), label.to_string()))
                .collect(),
        }
    }
}

fn group_by_bucket(records: &[BinnedRecord]) -> BTreeMap<i64, Vec<&BinnedRecord>> {
    let mut groups: BTreeMap<i64, Vec<&BinnedRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.date_interval).or_default().push(record);
    }
    groups
}

fn boxes<F>(groups: &BTreeMap<i64, Vec<&BinnedRecord>>, value: F) -> Vec<BucketBox>
where
    F: Fn(&BinnedRecord) -> Vec<f64>,
{
    groups
        .iter()
        .filter_map(|(&date_interval, members)| {
            let values: Vec<f64> = members.iter().flat_map(|r| value(*r)).collect();
            BoxStats::from_values(&values).map(|stats| BucketBox {
                date_interval,
                stats,
            })
        })
        .collect()
}

fn points<F>(groups: &BTreeMap<i64, Vec<&BinnedRecord>>, value: F) -> Vec<PointEstimate>
where
    F: Fn(&BinnedRecord) -> f64,
{
    groups
        .iter()
        .map(|(&date_interval, members)| {
            let values: Vec<f64> = members.iter().map(|r| value(*r)).collect();
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let std_dev = if values.len() > 1 {
                (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
            } else {
                0.0
            };
            PointEstimate {
                date_interval,
                mean,
                std_dev,
            }
        })
        .collect()
}

fn series<F>(records: &[BinnedRecord], value: F) -> Vec<SeriesPoint>
where
    F: Fn(&BinnedRecord) -> f64,
{
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date_interval: r.date_interval,
            value: value(r),
        })
        .collect();
    points.sort_by_key(|p| p.date_interval);
    points
}

/// Signed dizziness counts per bucket, dizzy days first.
pub fn dizzy_counts(records: &[BinnedRecord]) -> Vec<DizzyCount> {
    group_by_bucket(records)
        .into_iter()
        .flat_map(|(date_interval, members)| {
            let dizzy_days = members.iter().filter(|r| r.record.dizzy).count() as i64;
            let clear_days = members.len() as i64 - dizzy_days;

            [(true, -dizzy_days), (false, clear_days)]
                .into_iter()
                .filter(|(_, count)| *count != 0)
                .map(move |(dizzy, count)| DizzyCount {
                    date_interval,
                    dizzy,
                    count,
                })
        })
        .collect()
}

pub fn interval_plots(records: &[BinnedRecord]) -> IntervalPlots {
    let groups = group_by_bucket(records);

    IntervalPlots {
        sleep: boxes(&groups, |r| vec![r.record.sleep]),
        steps: boxes(&groups, |r| vec![f64::from(r.record.steps)]),
        body: boxes(&groups, |r| vec![f64::from(r.record.body)]),
        psyche: boxes(&groups, |r| vec![f64::from(r.record.psyche)]),
        bodybattery: boxes(&groups, |r| {
            vec![
                f64::from(r.record.bodybattery_min),
                f64::from(r.record.bodybattery_max),
            ]
        }),
        bodybattery_min_points: points(&groups, |r| f64::from(r.record.bodybattery_min)),
        bodybattery_max_points: points(&groups, |r| f64::from(r.record.bodybattery_max)),
        bodybattery_min_strip: series(records, |r| f64::from(r.record.bodybattery_min)),
        bodybattery_max_strip: series(records, |r| f64::from(r.record.bodybattery_max)),
        dizzy: dizzy_counts(records),
    }
}

pub fn daily_plots(records: &[BinnedRecord]) -> DailyPlots {
    DailyPlots {
        sleep: series(records, |r| r.record.sleep),
        bodybattery_min: series(records, |r| f64::from(r.record.bodybattery_min)),
        bodybattery_max: series(records, |r| f64::from(r.record.bodybattery_max)),
        steps: series(records, |r| f64::from(r.record.steps)),
        body: series(records, |r| f64::from(r.record.body)),
        psyche: series(records, |r| f64::from(r.record.psyche)),
        dizzy: dizzy_counts(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiaryRecord;
    use chrono::NaiveDate;

    fn binned(day: u32, date_interval: i64, sleep: f64, dizzy: bool) -> BinnedRecord {
        BinnedRecord {
            record: DiaryRecord {
                sleep,
                dizzy,
                ..DiaryRecord::defaults_for(NaiveDate::from_ymd_opt(2023, 1, day).unwrap())
            },
            date_interval,
        }
    }

    #[test]
    fn box_stats_interpolate_quartiles() {
        let stats = BoxStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn box_stats_of_empty_sample_is_none() {
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn labels_cover_every_metric() {
        let labels = PlotLabels::default();

        assert_eq!(labels.x, "Zeitintervall");
        assert_eq!(labels.y.len(), 6);
        assert_eq!(labels.y["sleep"], "Schlafzeit [h]");
        assert_eq!(labels.y["bodybattery"], "Body Battery [%]");
        assert_eq!(labels.y["steps"], "Schritte [absolut]");
        assert_eq!(labels.y["body"], "Körpergefühl [0-6]");
        assert_eq!(labels.y["psyche"], "Psychegefühl [0-6]");
        assert_eq!(labels.y["dizzy"], "Schwindel Häufigkeit [absolut]");
    }

    #[test]
    fn dizzy_days_count_negative() {
        let records = vec![
            binned(1, 0, 7.0, true),
            binned(2, 0, 7.0, false),
            binned(3, 0, 7.0, true),
            binned(4, 1, 7.0, false),
        ];

        assert_eq!(
            dizzy_counts(&records),
            vec![
                DizzyCount { date_interval: 0, dizzy: true, count: -2 },
                DizzyCount { date_interval: 0, dizzy: false, count: 1 },
                DizzyCount { date_interval: 1, dizzy: false, count: 1 },
            ]
        );
    }

    #[test]
    fn interval_plots_group_per_bucket() {
        let records = vec![
            binned(5, 1, 9.0, false),
            binned(1, 0, 6.0, false),
            binned(2, 0, 8.0, false),
        ];

        let plots = interval_plots(&records);

        assert_eq!(plots.sleep.len(), 2);
        assert_eq!(plots.sleep[0].date_interval, 0);
        assert_eq!(plots.sleep[0].stats.median, 7.0);
        assert_eq!(plots.sleep[1].stats.count, 1);
        // min and max readings are pooled
        assert_eq!(plots.bodybattery[0].stats.count, 4);
        assert_eq!(plots.bodybattery_min_points[1].std_dev, 0.0);
    }

    #[test]
    fn daily_series_is_sorted_by_interval() {
        let records = vec![binned(3, 2, 5.0, false), binned(1, 0, 8.0, false)];

        let plots = daily_plots(&records);

        let xs: Vec<i64> = plots.sleep.iter().map(|p| p.date_interval).collect();
        assert_eq!(xs, vec![0, 2]);
    }
}
