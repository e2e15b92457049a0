use chrono::{Duration, NaiveDate};
use rand::{seq::SliceRandom, Rng};

use crate::{models::DiaryRecord, AppError, AppResult};

const TASK_LEVELS: [i32; 3] = [1, 2, 3];

/// A plausible random diary entry for `date`.
pub fn random_entry<R: Rng>(date: NaiveDate, rng: &mut R) -> DiaryRecord {
    let task_count = rng.gen_range(0..=3);
    let tasks = (0..task_count)
        .filter_map(|_| TASK_LEVELS.choose(rng).copied())
        .collect();

    DiaryRecord {
        date,
        tasks,
        // half-hour steps between 6 and 10 hours
        sleep: f64::from(rng.gen_range(12..=20_i32)) / 2.0,
        bodybattery_min: rng.gen_range(6..=34),
        bodybattery_max: rng.gen_range(61..=89),
        steps: rng.gen_range(400..=8000),
        body: rng.gen_range(0..=6),
        psyche: rng.gen_range(0..=6),
        dizzy: rng.gen_bool(0.5),
        comment: String::new(),
    }
}

/// One random entry per day for the `days` days ending at `today`, newest first.
pub fn random_entries<R: Rng>(
    today: NaiveDate,
    days: u32,
    rng: &mut R,
) -> AppResult<Vec<DiaryRecord>> {
    if days < 1 {
        return Err(AppError::Validation(
            "amount of mock days must be at least 1".to_string(),
        ));
    }

    Ok((0..i64::from(days))
        .map(|offset| random_entry(today - Duration::days(offset), rng))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn entries_cover_consecutive_days_newest_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = NaiveDate::from_ymd_opt(2023, 3, 3).unwrap();

        let entries = random_entries(today, 3, &mut rng).unwrap();

        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                today,
                NaiveDate::from_ymd_opt(2023, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn entries_respect_form_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for entry in random_entries(today, 200, &mut rng).unwrap() {
            assert!(entry.validate_bounds().is_ok(), "{:?}", entry);
            assert!(entry.tasks.len() <= 3);
            assert!(entry.tasks.iter().all(|t| TASK_LEVELS.contains(t)));
            assert!(entry.comment.is_empty());
        }
    }

    #[test]
    fn zero_days_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(random_entries(today, 0, &mut rng).is_err());
    }
}
