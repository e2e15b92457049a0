use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{handlers, middleware as mw, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    match state.config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!(
            origin = %state.config.cors_origin,
            "Ignoring invalid CORS origin"
        ),
    }

    // Diary routes
    let diary_routes = Router::new()
        .route("/", get(handlers::diary_handler::get_diary))
        .route("/", post(handlers::diary_handler::submit_diary_entry))
        .route("/form", get(handlers::diary_handler::get_diary_form))
        .route("/range", get(handlers::diary_handler::get_diary_range))
        .route("/bulk", post(handlers::diary_handler::bulk_upsert_diary));

    // Analysis routes
    let analysis_routes = Router::new()
        .route("/", get(handlers::analysis_handler::get_analysis))
        .route("/defaults", get(handlers::analysis_handler::get_analysis_defaults));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .nest("/api/diary", diary_routes)
        .nest("/api/analysis", analysis_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(middleware::from_fn(mw::metrics_middleware))
        .layer(middleware::from_fn(mw::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Moodfit API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
            });
        };
    </script>
</body>
</html>
    "#)
}
