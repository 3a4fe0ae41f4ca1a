use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::errors::{Result, ValidationError};

/// Calendar boundaries of one month, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Computes the first and last instant (23:59:59.999) of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Result<MonthBounds> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidInput(
            "Month must be between 1 and 12".to_string(),
        )
        .into());
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidInput(format!("Invalid year/month: {}-{}", year, month))
    })?;

    Ok(bounds_of(first_day))
}

/// First instant of the month containing `now`.
pub fn current_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first_day = first_of_month(now.date_naive());
    Utc.from_utc_datetime(&first_day.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Bounds of the calendar month before the one containing `now`. Rollover
/// across year boundaries falls out of the calendar arithmetic: the day
/// before the first of January is the last of December.
pub fn previous_month_bounds(now: DateTime<Utc>) -> MonthBounds {
    let first_day = first_of_month(now.date_naive());
    let last_of_previous = first_day.pred_opt().unwrap_or(first_day);
    bounds_of(first_of_month(last_of_previous))
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn bounds_of(first_day: NaiveDate) -> MonthBounds {
    let next_month = if first_day.month() == 12 {
        NaiveDate::from_ymd_opt(first_day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first_day.year(), first_day.month() + 1, 1)
    };
    let last_day = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(first_day);

    MonthBounds {
        start: Utc.from_utc_datetime(&first_day.and_hms_opt(0, 0, 0).unwrap_or_default()),
        end: Utc.from_utc_datetime(
            &last_day
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_bounds_cover_whole_month_inclusive() {
        let bounds = month_bounds(2025, 7).unwrap();
        assert_eq!(
            bounds.start,
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(bounds.end.to_rfc3339(), "2025-07-31T23:59:59.999+00:00");
    }

    #[test]
    fn month_bounds_handle_february() {
        let bounds = month_bounds(2024, 2).unwrap();
        assert_eq!(bounds.end.to_rfc3339(), "2024-02-29T23:59:59.999+00:00");
        let bounds = month_bounds(2025, 2).unwrap();
        assert_eq!(bounds.end.to_rfc3339(), "2025-02-28T23:59:59.999+00:00");
    }

    #[test]
    fn month_bounds_reject_invalid_month() {
        assert!(month_bounds(2025, 0).is_err());
        assert!(month_bounds(2025, 13).is_err());
    }

    #[test]
    fn december_bounds_roll_into_next_year() {
        let bounds = month_bounds(2024, 12).unwrap();
        assert_eq!(bounds.end.to_rfc3339(), "2024-12-31T23:59:59.999+00:00");
    }

    #[test]
    fn previous_month_of_january_is_december_of_prior_year() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let bounds = previous_month_bounds(now);
        assert_eq!(
            bounds.start,
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(bounds.end.to_rfc3339(), "2024-12-31T23:59:59.999+00:00");
    }

    #[test]
    fn current_month_start_truncates_to_first_day() {
        let now = Utc.with_ymd_and_hms(2025, 7, 20, 18, 30, 0).unwrap();
        assert_eq!(
            current_month_start(now),
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
        );
    }
}
