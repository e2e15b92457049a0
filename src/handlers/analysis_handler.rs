use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    analysis::{self, BucketWidth},
    handlers::{parse_date, today},
    models::{AnalysisDefaults, AnalysisReport},
    AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetAnalysisQuery {
    /// Defaults to the oldest stored record, or a week ago
    pub start: Option<String>,
    /// Defaults to today
    pub end: Option<String>,
    /// Bucket width label such as `1day`, `3days` or `7days`
    pub interval: Option<String>,
}

/// GET /api/analysis/defaults
#[utoipa::path(
    get,
    path = "/api/analysis/defaults",
    responses(
        (status = 200, description = "Suggested analysis window", body = AnalysisDefaults)
    ),
    tag = "analysis"
)]
pub async fn get_analysis_defaults(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<AnalysisDefaults>> {
    let defaults = analysis::default_range(state.store.as_ref(), today()).await?;
    Ok(Json(defaults))
}

/// GET /api/analysis?start=&end=&interval=
#[utoipa::path(
    get,
    path = "/api/analysis",
    params(GetAnalysisQuery),
    responses(
        (status = 200, description = "Binned records and chart sources", body = AnalysisReport),
        (status = 400, description = "Invalid date or start after end"),
        (status = 422, description = "Invalid interval")
    ),
    tag = "analysis"
)]
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetAnalysisQuery>,
) -> AppResult<Json<AnalysisReport>> {
    tracing::debug!(
        "get_analysis called with start={:?}, end={:?}, interval={:?}",
        query.start,
        query.end,
        query.interval
    );

    let width = match query.interval.as_deref() {
        Some(label) => label.parse::<BucketWidth>()?,
        None => BucketWidth::default(),
    };

    let end = match query.end {
        Some(raw) => parse_date("end", &raw)?,
        None => today(),
    };

    let start = match query.start {
        Some(raw) => parse_date("start", &raw)?,
        // Records newer than `end` must not push the default past it
        None => analysis::default_range(state.store.as_ref(), end)
            .await?
            .start
            .min(end),
    };

    let report = analysis::build_report(state.store.as_ref(), start, end, width).await?;

    Ok(Json(report))
}
