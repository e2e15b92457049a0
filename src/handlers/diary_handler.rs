use axum::{
    extract::{Query, State},
    Json,
};
use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    analysis::validate_range,
    db::Outcome,
    handlers::{parse_date, today},
    models::{DiaryFormResponse, DiaryMutationResponse, DiaryRecord},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetDiaryQuery {
    /// Date in `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetDiaryFormQuery {
    /// Date in `YYYY-MM-DD`, defaults to yesterday
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetDiaryRangeQuery {
    pub start: String,
    pub end: String,
}

/// GET /api/diary?date=
#[utoipa::path(
    get,
    path = "/api/diary",
    params(GetDiaryQuery),
    responses(
        (status = 200, description = "Diary record for the date", body = DiaryRecord),
        (status = 400, description = "Invalid date format"),
        (status = 404, description = "No record for the date")
    ),
    tag = "diary"
)]
pub async fn get_diary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetDiaryQuery>,
) -> AppResult<Json<DiaryRecord>> {
    let date = parse_date("date", &query.date)?;

    state
        .store
        .fetch_by_date(date)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No diary record for {}", date)))
}

/// GET /api/diary/form?date= - Values to pre-populate the diary form with
#[utoipa::path(
    get,
    path = "/api/diary/form",
    params(GetDiaryFormQuery),
    responses(
        (status = 200, description = "Stored record or form defaults", body = DiaryFormResponse),
        (status = 400, description = "Invalid date format")
    ),
    tag = "diary"
)]
pub async fn get_diary_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetDiaryFormQuery>,
) -> AppResult<Json<DiaryFormResponse>> {
    let date = match query.date {
        Some(raw) => parse_date("date", &raw)?,
        None => today().pred_opt().unwrap_or_else(today),
    };

    let response = match state.store.fetch_by_date(date).await? {
        Some(record) => DiaryFormResponse {
            exists: true,
            record,
        },
        None => DiaryFormResponse {
            exists: false,
            record: DiaryRecord::defaults_for(date),
        },
    };

    Ok(Json(response))
}

/// POST /api/diary - Save the values collected by the diary form
///
/// The body is the complete record. Stored values and form defaults are
/// merged in when the form is loaded, so the write is a single upsert.
#[utoipa::path(
    post,
    path = "/api/diary",
    request_body = DiaryRecord,
    responses(
        (status = 200, description = "Save outcome", body = DiaryMutationResponse),
        (status = 422, description = "A value is outside the form's range")
    ),
    tag = "diary"
)]
pub async fn submit_diary_entry(
    State(state): State<Arc<AppState>>,
    Json(record): Json<DiaryRecord>,
) -> AppResult<Json<DiaryMutationResponse>> {
    record.validate_bounds()?;

    let outcome = state.store.upsert(&record).await;
    let label = outcome_label(&outcome);
    counter!("diary_upserts_total", "outcome" => label).increment(1);
    tracing::info!(date = %record.date, outcome = label, "Diary entry submitted");

    Ok(Json(outcome.into()))
}

/// POST /api/diary/bulk - Upsert many complete records at once
#[utoipa::path(
    post,
    path = "/api/diary/bulk",
    request_body = Vec<DiaryRecord>,
    responses(
        (status = 200, description = "Save outcome", body = DiaryMutationResponse),
        (status = 422, description = "A record has a value outside the form's range")
    ),
    tag = "diary"
)]
pub async fn bulk_upsert_diary(
    State(state): State<Arc<AppState>>,
    Json(records): Json<Vec<DiaryRecord>>,
) -> AppResult<Json<DiaryMutationResponse>> {
    for record in &records {
        record.validate_bounds()?;
    }

    let outcome = state.store.upsert_many(&records).await;
    record_bulk_outcome(&outcome, records.len());
    tracing::info!(count = records.len(), outcome = outcome_label(&outcome), "Bulk diary upsert");

    Ok(Json(outcome.into()))
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    if outcome.is_success() {
        "success"
    } else {
        "failure"
    }
}

// A batch commits or rolls back as a whole, so it is counted once. Records
// only count as upserted when the batch committed.
fn record_bulk_outcome(outcome: &Outcome, count: usize) {
    counter!("diary_bulk_upserts_total", "outcome" => outcome_label(outcome)).increment(1);
    if outcome.is_success() {
        counter!("diary_upserts_total", "outcome" => "success").increment(count as u64);
    }
}

/// GET /api/diary/range?start=&end=
#[utoipa::path(
    get,
    path = "/api/diary/range",
    params(GetDiaryRangeQuery),
    responses(
        (status = 200, description = "Records in the range, newest first", body = Vec<DiaryRecord>),
        (status = 400, description = "Invalid date or start after end")
    ),
    tag = "diary"
)]
pub async fn get_diary_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetDiaryRangeQuery>,
) -> AppResult<Json<Vec<DiaryRecord>>> {
    let start = parse_date("start", &query.start)?;
    let end = parse_date("end", &query.end)?;
    validate_range(start, end)?;

    let records = state.store.fetch_by_date_range(start, end).await?;

    Ok(Json(records))
}
