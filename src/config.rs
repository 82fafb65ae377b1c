//! process-wide constants for schedule computation

/// year basis used when a request leaves days-per-year unset
pub const DEFAULT_DAYS_PER_YEAR: u32 = 360;

/// fortnightly periods per year, basis of the fortnightly period rate
pub const FORTNIGHTS_PER_YEAR: u32 = 26;

/// monthly periods per year, basis of the monthly period rate
pub const MONTHS_PER_YEAR: u32 = 12;

/// length of one fortnightly cycle
pub const FORTNIGHT_DAYS: i64 = 14;

/// a monthly first period shorter than this is pushed out one more month
pub const MIN_FIRST_PERIOD_DAYS: i64 = 20;

/// boundary date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// decimal places of every amount in a schedule
pub const MONEY_SCALE: u32 = 2;

/// valid range of the due day (day of month, or ISO weekday for fortnightly)
pub const DUE_DAY_RANGE: std::ops::RangeInclusive<u32> = 1..=31;
