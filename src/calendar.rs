use chrono::{Datelike, Duration, NaiveDate};

use crate::config::DATE_FORMAT;
use crate::errors::{Result, ScheduleError};

/// parse a boundary date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ScheduleError::DateParse {
        value: value.to_string(),
    })
}

/// format a date for the boundary
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// add (or subtract) whole days
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days)).ok_or_else(|| {
        ScheduleError::date_overflow(format!("{date} + {days} days is out of range"))
    })
}

/// Move `months` months past the month of `date` and land on `day`.
///
/// The landing day is pinned: when the target month is shorter than `day`
/// the result is that month's last day, never a day of the following month.
/// Only the year and month of `date` matter.
pub fn add_months_pinned(date: NaiveDate, months: u32, day: u32) -> Result<NaiveDate> {
    let overflow =
        || ScheduleError::date_overflow(format!("{date} + {months} months is out of range"));

    let total = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = i32::try_from(total.div_euclid(12)).map_err(|_| overflow())?;
    let month = total.rem_euclid(12) as u32 + 1;
    let last = last_day_of_month(year, month).ok_or_else(overflow)?;
    let day = day.clamp(1, last.day());

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(overflow)
}

/// ISO weekday number, Monday = 1 through Sunday = 7
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// inclusive count of days from `start` to `end`
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// last calendar day of a month, None outside chrono's date range
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(parse_date("2022-01-31").unwrap(), date(2022, 1, 31));
        assert_eq!(format_date(date(2022, 3, 1)), "2022-03-01");
        assert_eq!(
            parse_date("2022/01/31"),
            Err(ScheduleError::DateParse { value: "2022/01/31".to_string() })
        );
        assert!(parse_date("2022-02-30").is_err());
    }

    #[test]
    fn test_add_months_pins_to_month_end() {
        assert_eq!(add_months_pinned(date(2022, 1, 31), 1, 31).unwrap(), date(2022, 2, 28));
        assert_eq!(add_months_pinned(date(2024, 1, 31), 1, 31).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months_pinned(date(2022, 1, 31), 2, 31).unwrap(), date(2022, 3, 31));
        assert_eq!(add_months_pinned(date(2022, 1, 15), 3, 30).unwrap(), date(2022, 4, 30));
    }

    #[test]
    fn test_add_months_uses_target_day_not_source_day() {
        // only the month of the source date matters
        assert_eq!(add_months_pinned(date(2022, 2, 28), 1, 31).unwrap(), date(2022, 3, 31));
        assert_eq!(add_months_pinned(date(2022, 1, 1), 0, 20).unwrap(), date(2022, 1, 20));
    }

    #[test]
    fn test_add_months_crosses_year() {
        assert_eq!(add_months_pinned(date(2022, 11, 5), 3, 5).unwrap(), date(2023, 2, 5));
        assert_eq!(add_months_pinned(date(2022, 1, 1), 359, 1).unwrap(), date(2051, 12, 1));
        assert_eq!(add_months_pinned(date(2022, 11, 30), 1, 31).unwrap(), date(2022, 12, 31));
    }

    #[test]
    fn test_iso_weekday() {
        // 2024-01-01 is a monday
        assert_eq!(iso_weekday(date(2024, 1, 1)), 1);
        assert_eq!(iso_weekday(date(2024, 1, 7)), 7);
    }

    #[test]
    fn test_inclusive_days() {
        assert_eq!(inclusive_days(date(2022, 1, 1), date(2022, 1, 31)), 31);
        assert_eq!(inclusive_days(date(2022, 2, 1), date(2022, 2, 1)), 1);
    }

    #[test]
    fn test_add_days_overflow() {
        assert!(add_days(NaiveDate::MAX, 1).is_err());
        assert_eq!(add_days(date(2022, 2, 1), -1).unwrap(), date(2022, 1, 31));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2023, 2), Some(date(2023, 2, 28)));
        assert_eq!(last_day_of_month(2024, 2), Some(date(2024, 2, 29)));
        assert_eq!(last_day_of_month(1900, 2), Some(date(1900, 2, 28)));
        assert_eq!(last_day_of_month(2000, 2), Some(date(2000, 2, 29)));
        assert_eq!(last_day_of_month(2022, 4), Some(date(2022, 4, 30)));
        assert_eq!(last_day_of_month(2022, 12), Some(date(2022, 12, 31)));
        assert_eq!(last_day_of_month(2022, 13), None);
    }
}
