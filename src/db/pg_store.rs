use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgArguments, query::Query, PgPool, Postgres};

use crate::{
    db::{DiaryStore, Outcome},
    models::DiaryRecord,
    AppResult,
};

const UPSERT_SQL: &str = r#"
    INSERT INTO diary (
        date, tasks, sleep, bodybattery_min, bodybattery_max, steps, body, psyche, dizzy, comment
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    ON CONFLICT (date) DO UPDATE SET
        tasks = EXCLUDED.tasks,
        sleep = EXCLUDED.sleep,
        bodybattery_min = EXCLUDED.bodybattery_min,
        bodybattery_max = EXCLUDED.bodybattery_max,
        steps = EXCLUDED.steps,
        body = EXCLUDED.body,
        psyche = EXCLUDED.psyche,
        dizzy = EXCLUDED.dizzy,
        comment = EXCLUDED.comment
"#;

const SELECT_COLUMNS: &str =
    "date, tasks, sleep, bodybattery_min, bodybattery_max, steps, body, psyche, dizzy, comment";

/// Diary table in PostgreSQL
#[derive(Clone)]
pub struct PgDiaryStore {
    pool: PgPool,
}

impl PgDiaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn upsert_query(record: &DiaryRecord) -> Query<'_, Postgres, PgArguments> {
    sqlx::query(UPSERT_SQL)
        .bind(record.date)
        .bind(record.tasks.as_slice())
        .bind(record.sleep)
        .bind(record.bodybattery_min)
        .bind(record.bodybattery_max)
        .bind(record.steps)
        .bind(record.body)
        .bind(record.psyche)
        .bind(record.dizzy)
        .bind(&record.comment)
}

#[async_trait]
impl DiaryStore for PgDiaryStore {
    async fn upsert(&self, record: &DiaryRecord) -> Outcome {
        match upsert_query(record).execute(&self.pool).await {
            Ok(result) => Outcome::from_rows_affected(result.rows_affected(), 1),
            Err(e) => Outcome::from_db_error(&e),
        }
    }

    async fn upsert_many(&self, records: &[DiaryRecord]) -> Outcome {
        let mut tx = match self.pool.begin().await {
            Ok(tx) => tx,
            Err(e) => return Outcome::from_db_error(&e),
        };

        let mut affected = 0;
        for record in records {
            match upsert_query(record).execute(&mut *tx).await {
                Ok(result) => affected += result.rows_affected(),
                // Dropping the transaction rolls it back
                Err(e) => return Outcome::from_db_error(&e),
            }
        }

        let outcome = Outcome::from_rows_affected(affected, records.len() as u64);
        if !outcome.is_success() {
            if let Err(e) = tx.rollback().await {
                tracing::warn!(error = %e, "Rollback after bulk upsert failed");
            }
            return outcome;
        }

        match tx.commit().await {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::from_db_error(&e),
        }
    }

    async fn fetch_by_date(&self, date: NaiveDate) -> AppResult<Option<DiaryRecord>> {
        let sql = format!("SELECT {} FROM diary WHERE date = $1", SELECT_COLUMNS);
        let record = sqlx::query_as::<_, DiaryRecord>(&sql)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DiaryRecord>> {
        let sql = format!(
            "SELECT {} FROM diary WHERE date >= $1 AND date <= $2 ORDER BY date DESC",
            SELECT_COLUMNS
        );
        let records = sqlx::query_as::<_, DiaryRecord>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn fetch_oldest_date(&self) -> AppResult<Option<NaiveDate>> {
        let oldest = sqlx::query_scalar::<_, Option<NaiveDate>>("SELECT MIN(date) FROM diary")
            .fetch_one(&self.pool)
            .await?;

        Ok(oldest)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
