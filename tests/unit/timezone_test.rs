// Report-timezone calendar arithmetic over epoch-millisecond timestamps.

use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};

use triplog::core::timezone::{ReportTimezone, MS_PER_DAY};

fn ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
        .timestamp_millis()
}

#[test]
fn offset_parsing_round_trips_common_zones() {
    for (raw, secs) in [
        ("+05:30", 19_800),
        ("+00:00", 0),
        ("-08:00", -28_800),
        ("+13:45", 49_500),
    ] {
        let tz = ReportTimezone::parse(raw).unwrap();
        assert_eq!(tz.offset_ms(), secs * 1000, "offset for {}", raw);
    }
}

#[test]
fn utc_midnight_is_not_kolkata_midnight() {
    let utc = ReportTimezone::utc();
    let kolkata = ReportTimezone::parse("+05:30").unwrap();

    let instant = ms(2026, 8, 7, 22, 0, 0);
    // 22:00 UTC on the 7th is 03:30 on the 8th in Kolkata.
    assert_ne!(utc.day_index(instant), kolkata.day_index(instant));
    assert_eq!(
        kolkata.date_of_day_index(kolkata.day_index(instant)),
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    );
}

#[test]
fn day_end_is_one_millisecond_before_next_day() {
    let tz = ReportTimezone::parse("+05:30").unwrap();
    let instant = ms(2026, 8, 7, 12, 0, 0);

    let end = tz.day_end(instant);
    assert_eq!(tz.day_index(end), tz.day_index(instant));
    assert_eq!(tz.day_index(end + 1), tz.day_index(instant) + 1);
}

#[test]
fn week_bounds_anchor_to_sunday_in_the_report_timezone() {
    let kolkata = ReportTimezone::parse("+05:30").unwrap();
    // Saturday 2026-08-08 20:00 UTC is already Sunday 01:30 in Kolkata,
    // so the week containing it starts that same local Sunday.
    let instant = ms(2026, 8, 8, 20, 0, 0);

    let (start, end) = kolkata.week_bounds(instant);
    let start_date = kolkata.date_of_day_index(kolkata.day_index(start));
    assert_eq!(start_date.weekday(), Weekday::Sun);
    assert_eq!(start_date, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap());
    assert_eq!(end - start, 7 * MS_PER_DAY - 1);
    assert!(start <= instant && instant <= end);
}

#[test]
fn month_bounds_are_inclusive_and_adjacent() {
    let tz = ReportTimezone::parse("+05:30").unwrap();
    let in_january = ms(2026, 1, 15, 12, 0, 0);
    let (jan_start, jan_end) = tz.month_bounds(in_january);

    let in_february = jan_end + 1;
    let (feb_start, _) = tz.month_bounds(in_february);
    assert_eq!(feb_start, jan_end + 1);
    assert!(jan_start <= in_january && in_january <= jan_end);
}

#[test]
fn year_bounds_span_exactly_the_local_year() {
    let tz = ReportTimezone::parse("-08:00").unwrap();
    let instant = ms(2026, 6, 1, 0, 0, 0);
    let (start, end) = tz.year_bounds(instant);

    assert_eq!(tz.month_of(start), 1);
    assert_eq!(tz.month_of(end), 12);
    assert_eq!(tz.month_of(start - 1), 12);
    assert_eq!(tz.month_of(end + 1), 1);
}

#[test]
fn month_of_uses_the_local_calendar() {
    let kolkata = ReportTimezone::parse("+05:30").unwrap();
    // 2026-05-31 19:30 UTC is 2026-06-01 01:00 in Kolkata.
    let instant = ms(2026, 5, 31, 19, 30, 0);
    assert_eq!(kolkata.month_of(instant), 6);
    assert_eq!(ReportTimezone::utc().month_of(instant), 5);
}

#[test]
fn extreme_timestamps_do_not_panic() {
    let tz = ReportTimezone::parse("+05:30").unwrap();
    for ms in [i64::MIN, i64::MAX, 0, -1] {
        let _ = tz.day_start(ms);
        let _ = tz.day_end(ms);
        let _ = tz.month_bounds(ms);
        let _ = tz.week_bounds(ms);
        let _ = tz.year_bounds(ms);
        let _ = tz.month_of(ms);
    }
}
