pub mod analysis_handler;
pub mod diary_handler;
pub mod health;
pub mod metrics;

pub use health::health_check;
pub use self::metrics::{setup_metrics_recorder, MetricsState};

use chrono::{Local, NaiveDate};

use crate::{AppError, AppResult};

pub(crate) fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid {} date: {}", field, e)))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("start", "2023-01-04").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 4).unwrap()
        );
    }

    #[test]
    fn rejects_other_formats() {
        let err = parse_date("start", "04.01.2023").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("start")));
    }
}
