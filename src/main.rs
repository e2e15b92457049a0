mod analysis;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod mock;
mod models;
mod openapi;
mod startup;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use config::StoreBackend;
use db::{DiaryStore, MemoryDiaryStore, Outcome, PgDiaryStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DiaryStore>,
    pub config: AppConfig,
    pub metrics: Arc<handlers::MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,moodfit_api=debug,tower_http=debug".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    let store: Arc<dyn DiaryStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url).await.map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                e
            })?;
            tracing::info!("Database pool created and migrations applied");
            Arc::new(PgDiaryStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory diary store, records are lost on exit");
            Arc::new(MemoryDiaryStore::new())
        }
    };

    if let Some(days) = config.mock_seed_days {
        seed_mock_entries(store.as_ref(), days).await?;
    }

    let metrics_state = Arc::new(handlers::setup_metrics_recorder()?);
    tracing::info!("Metrics recorder initialized");

    let state = Arc::new(AppState {
        store: store.clone(),
        config: config.clone(),
        metrics: metrics_state,
    });

    let app = startup::build_router(state);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn seed_mock_entries(store: &dyn DiaryStore, days: u32) -> Result<(), AppError> {
    let entries = mock::random_entries(handlers::today(), days, &mut rand::thread_rng())?;

    match store.upsert_many(&entries).await {
        Outcome::Success => {
            tracing::info!(days, "Seeded mock diary entries");
            Ok(())
        }
        Outcome::Failure(reason) => Err(AppError::Internal(format!(
            "Seeding mock entries failed: {}",
            reason
        ))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
