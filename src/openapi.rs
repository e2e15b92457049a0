use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Moodfit API",
        version = "0.1.0",
        description = "Daily health and mood diary with interval analysis"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Diary
        crate::handlers::diary_handler::get_diary,
        crate::handlers::diary_handler::get_diary_form,
        crate::handlers::diary_handler::submit_diary_entry,
        crate::handlers::diary_handler::bulk_upsert_diary,
        crate::handlers::diary_handler::get_diary_range,

        // Analysis
        crate::handlers::analysis_handler::get_analysis_defaults,
        crate::handlers::analysis_handler::get_analysis,
    ),
    components(
        schemas(
            crate::models::DiaryRecord,
            crate::models::DiaryFormResponse,
            crate::models::DiaryMutationResponse,
            crate::models::AnalysisDefaults,
            crate::models::AnalysisReport,
            crate::analysis::BinnedRecord,
            crate::analysis::plots::PlotData,
            crate::analysis::plots::PlotLabels,
            crate::analysis::plots::IntervalPlots,
            crate::analysis::plots::DailyPlots,
            crate::analysis::plots::BucketBox,
            crate::analysis::plots::BoxStats,
            crate::analysis::plots::PointEstimate,
            crate::analysis::plots::SeriesPoint,
            crate::analysis::plots::DizzyCount,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "diary", description = "Diary form and records"),
        (name = "analysis", description = "Interval analysis and chart data"),
    )
)]
pub struct ApiDoc;
