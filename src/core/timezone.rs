use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::core::{AppError, Result};

pub const MS_PER_DAY: i64 = 86_400_000;

// 9999-12-31T23:59:59.999Z; inputs beyond this are clamped so calendar
// conversions stay inside chrono's representable range.
const MAX_EPOCH_MS: i64 = 253_402_300_799_999;

/// Current instant as epoch-milliseconds, the unit every persisted
/// timestamp uses.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Timezone used for all calendar bucketing (day/week/month/year bounds).
///
/// Stored timestamps are plain UTC epoch-millis; this type decides where
/// the calendar-day boundaries fall. The offset is configuration, not a
/// hard-coded regional constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTimezone {
    offset_ms: i64,
}

impl ReportTimezone {
    /// Parse an offset of the form `+05:30` / `-08:00`.
    pub fn parse(raw: &str) -> Result<Self> {
        let bad = || {
            AppError::Configuration(format!(
                "Invalid timezone offset '{}', expected +HH:MM or -HH:MM",
                raw
            ))
        };

        let bytes = raw.as_bytes();
        if bytes.len() != 6 || bytes[3] != b':' {
            return Err(bad());
        }
        let sign: i64 = match bytes[0] {
            b'+' => 1,
            b'-' => -1,
            _ => return Err(bad()),
        };
        let hours: i64 = raw[1..3].parse().map_err(|_| bad())?;
        let minutes: i64 = raw[4..6].parse().map_err(|_| bad())?;
        if minutes > 59 {
            return Err(bad());
        }

        let offset_secs = sign * (hours * 3600 + minutes * 60);
        // Delegate the range check so the parsed offset is always usable
        // with chrono.
        FixedOffset::east_opt(offset_secs as i32).ok_or_else(bad)?;

        Ok(Self {
            offset_ms: offset_secs * 1000,
        })
    }

    pub fn utc() -> Self {
        Self { offset_ms: 0 }
    }

    pub fn offset_ms(&self) -> i64 {
        self.offset_ms
    }

    /// Local wall-clock time for a UTC instant.
    fn local_civil(&self, ms: i64) -> NaiveDateTime {
        let shifted = clamp_ms(ms) + self.offset_ms;
        DateTime::from_timestamp_millis(shifted)
            .expect("clamped epoch-millis is in range")
            .naive_utc()
    }

    /// Epoch-millis of a local wall-clock time.
    fn civil_to_ms(&self, civil: NaiveDateTime) -> i64 {
        civil.and_utc().timestamp_millis() - self.offset_ms
    }

    /// Days since 1970-01-01 in this timezone. Two instants share an index
    /// exactly when they fall on the same local calendar day.
    pub fn day_index(&self, ms: i64) -> i64 {
        (clamp_ms(ms) + self.offset_ms).div_euclid(MS_PER_DAY)
    }

    /// Calendar date of a day index.
    pub fn date_of_day_index(&self, index: i64) -> NaiveDate {
        DateTime::from_timestamp_millis(index.clamp(-2_932_896, 2_932_896) * MS_PER_DAY)
            .expect("clamped day index is in range")
            .date_naive()
    }

    /// Local day start, 00:00:00.000.
    pub fn day_start(&self, ms: i64) -> i64 {
        self.day_index(ms) * MS_PER_DAY - self.offset_ms
    }

    /// Local day end, 23:59:59.999.
    pub fn day_end(&self, ms: i64) -> i64 {
        self.day_start(ms) + MS_PER_DAY - 1
    }

    /// Inclusive bounds of the local calendar month containing `ms`.
    pub fn month_bounds(&self, ms: i64) -> (i64, i64) {
        let local = self.local_civil(ms);
        let start = month_start_date(local.year(), local.month());
        let next = if local.month() == 12 {
            month_start_date(local.year() + 1, 1)
        } else {
            month_start_date(local.year(), local.month() + 1)
        };
        (
            self.civil_to_ms(midnight(start)),
            self.civil_to_ms(midnight(next)) - 1,
        )
    }

    /// Inclusive bounds of the local week containing `ms`.
    /// Weeks run Sunday 00:00:00.000 through Saturday 23:59:59.999.
    pub fn week_bounds(&self, ms: i64) -> (i64, i64) {
        let today = self.day_index(ms);
        let weekday = self.date_of_day_index(today).weekday();
        let sunday = today - weekday.num_days_from_sunday() as i64;
        let start = sunday * MS_PER_DAY - self.offset_ms;
        (start, start + 7 * MS_PER_DAY - 1)
    }

    /// Inclusive bounds of the local calendar year containing `ms`.
    pub fn year_bounds(&self, ms: i64) -> (i64, i64) {
        let year = self.local_civil(ms).year();
        (
            self.civil_to_ms(midnight(month_start_date(year, 1))),
            self.civil_to_ms(midnight(month_start_date(year + 1, 1))) - 1,
        )
    }

    /// Local calendar month of an instant, 1-12.
    pub fn month_of(&self, ms: i64) -> u32 {
        self.local_civil(ms).month()
    }
}

fn clamp_ms(ms: i64) -> i64 {
    ms.clamp(-MAX_EPOCH_MS, MAX_EPOCH_MS)
}

fn month_start_date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar date")
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("valid wall-clock time")
}
