use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::{
    db::{DiaryStore, Outcome},
    models::DiaryRecord,
    AppResult,
};

/// Diary records held in process memory, ordered by date.
#[derive(Default)]
pub struct MemoryDiaryStore {
    records: RwLock<BTreeMap<NaiveDate, DiaryRecord>>,
}

impl MemoryDiaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiaryStore for MemoryDiaryStore {
    async fn upsert(&self, record: &DiaryRecord) -> Outcome {
        self.records
            .write()
            .await
            .insert(record.date, record.clone());
        Outcome::Success
    }

    async fn upsert_many(&self, records: &[DiaryRecord]) -> Outcome {
        let mut guard = self.records.write().await;
        for record in records {
            guard.insert(record.date, record.clone());
        }
        Outcome::Success
    }

    async fn fetch_by_date(&self, date: NaiveDate) -> AppResult<Option<DiaryRecord>> {
        Ok(self.records.read().await.get(&date).cloned())
    }

    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DiaryRecord>> {
        // BTreeMap::range panics on an inverted range
        if start > end {
            return Ok(Vec::new());
        }

        Ok(self
            .records
            .read()
            .await
            .range(start..=end)
            .rev()
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn fetch_oldest_date(&self) -> AppResult<Option<NaiveDate>> {
        Ok(self.records.read().await.keys().next().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn upsert_twice_keeps_second_payload() {
        let store = MemoryDiaryStore::new();
        let day = date(2023, 1, 1);

        let first = DiaryRecord {
            steps: 1000,
            ..DiaryRecord::defaults_for(day)
        };
        let second = DiaryRecord {
            steps: 9000,
            comment: "long walk".to_string(),
            ..DiaryRecord::defaults_for(day)
        };

        assert_eq!(store.upsert(&first).await, Outcome::Success);
        assert_eq!(store.upsert(&second).await, Outcome::Success);

        assert_eq!(store.fetch_by_date_range(day, day).await.unwrap().len(), 1);
        assert_eq!(store.fetch_by_date(day).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn round_trip_preserves_all_fields() {
        let store = MemoryDiaryStore::new();
        let record = DiaryRecord {
            date: date(2023, 5, 17),
            tasks: vec![1, 3, 3],
            sleep: 7.5,
            bodybattery_min: 12,
            bodybattery_max: 88,
            steps: 6543,
            body: 2,
            psyche: 4,
            dizzy: true,
            comment: "headache in the evening".to_string(),
        };

        store.upsert(&record).await;

        assert_eq!(store.fetch_by_date(record.date).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn missing_date_is_none() {
        let store = MemoryDiaryStore::new();
        assert_eq!(store.fetch_by_date(date(2023, 1, 1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn range_is_inclusive_and_descending() {
        let store = MemoryDiaryStore::new();
        let (d1, d2, d3) = (date(2023, 1, 1), date(2023, 1, 2), date(2023, 1, 3));
        store
            .upsert_many(&[
                DiaryRecord::defaults_for(d3),
                DiaryRecord::defaults_for(d1),
                DiaryRecord::defaults_for(d2),
            ])
            .await;

        let dates: Vec<NaiveDate> = store
            .fetch_by_date_range(d1, d2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();

        assert_eq!(dates, vec![d2, d1]);
    }

    #[tokio::test]
    async fn inverted_range_is_empty() {
        let store = MemoryDiaryStore::new();
        store.upsert(&DiaryRecord::defaults_for(date(2023, 1, 15))).await;

        let records = store
            .fetch_by_date_range(date(2023, 2, 1), date(2023, 1, 1))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn oldest_date_tracks_minimum() {
        let store = MemoryDiaryStore::new();
        assert_eq!(store.fetch_oldest_date().await.unwrap(), None);

        store.upsert(&DiaryRecord::defaults_for(date(2023, 3, 1))).await;
        store.upsert(&DiaryRecord::defaults_for(date(2023, 1, 9))).await;

        assert_eq!(store.fetch_oldest_date().await.unwrap(), Some(date(2023, 1, 9)));
    }
}
