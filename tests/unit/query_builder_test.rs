// Query plan construction: limit resolution, sort precedence, date
// normalization, and the recent-window shorthand.

use proptest::prelude::*;

use triplog::core::timezone::{ReportTimezone, MS_PER_DAY};
use triplog::modules::trips::models::TripFilter;
use triplog::modules::trips::services::query_builder::{
    build_plan, SortOrder, DEFAULT_PAGE_SIZE, WIDE_PAGE_SIZE,
};

const NOW: i64 = 1_754_000_000_000;

fn utc_plan(filter: TripFilter) -> triplog::modules::trips::services::QueryPlan {
    build_plan(&filter, &ReportTimezone::utc(), NOW)
}

#[test]
fn wide_page_sentinel_maps_to_500() {
    let plan = utc_plan(TripFilter {
        limit: Some(-1),
        ..TripFilter::default()
    });
    assert_eq!(plan.limit, WIDE_PAGE_SIZE);
    assert_eq!(WIDE_PAGE_SIZE, 500);
}

#[test]
fn missing_limit_defaults_to_100() {
    assert_eq!(utc_plan(TripFilter::default()).limit, DEFAULT_PAGE_SIZE);
    assert_eq!(DEFAULT_PAGE_SIZE, 100);
}

#[test]
fn search_beats_requested_updated_sort() {
    let plan = utc_plan(TripFilter {
        search_string: Some("abc".to_string()),
        sort: Some("updated".to_string()),
        ..TripFilter::default()
    });
    assert_eq!(plan.order, SortOrder::TripDateAsc);
}

#[test]
fn date_bound_beats_requested_tripdate_sort() {
    // Explicit tripdate sort is *descending*; a date bound flips the
    // result to chronological ascending.
    let plan = utc_plan(TripFilter {
        date_from: Some(NOW - 3 * MS_PER_DAY),
        sort: Some("tripdate".to_string()),
        ..TripFilter::default()
    });
    assert_eq!(plan.order, SortOrder::TripDateAsc);
}

#[test]
fn unfiltered_sorts_follow_the_request() {
    let updated = utc_plan(TripFilter {
        sort: Some("updated".to_string()),
        ..TripFilter::default()
    });
    assert_eq!(updated.order, SortOrder::UpdatedDesc);

    let tripdate = utc_plan(TripFilter {
        sort: Some("tripdate".to_string()),
        ..TripFilter::default()
    });
    assert_eq!(tripdate.order, SortOrder::TripDateDesc);

    let absent = utc_plan(TripFilter::default());
    assert_eq!(absent.order, SortOrder::CreatedDesc);
}

#[test]
fn today_window_excludes_the_end_of_yesterday() {
    let tz = ReportTimezone::parse("+05:30").unwrap();
    let plan = build_plan(
        &TripFilter {
            recent: Some("today".to_string()),
            ..TripFilter::default()
        },
        &tz,
        NOW,
    );

    let today_start = plan.date_from.expect("today window sets a lower bound");
    let yesterday_last_ms = today_start - 1;

    // A trip at 23:59:59.999 yesterday falls outside the window.
    assert!(yesterday_last_ms < today_start);
    assert_eq!(tz.day_end(yesterday_last_ms), yesterday_last_ms);
    assert_eq!(tz.day_start(NOW), today_start);
    assert_eq!(plan.date_to, None);
}

#[test]
fn explicit_bounds_cover_whole_days_in_the_report_timezone() {
    let tz = ReportTimezone::parse("+05:30").unwrap();
    let filter = TripFilter {
        date_from: Some(NOW),
        date_to: Some(NOW),
        ..TripFilter::default()
    };
    let plan = build_plan(&filter, &tz, NOW);

    let from = plan.date_from.unwrap();
    let to = plan.date_to.unwrap();
    assert_eq!(to - from, MS_PER_DAY - 1);
    assert_eq!(tz.day_start(NOW), from);
    assert_eq!(tz.day_end(NOW), to);
}

proptest! {
    #[test]
    fn plans_are_deterministic(
        limit in proptest::option::of(-10i64..1000),
        sort in proptest::option::of("[a-z_]{0,12}"),
        search in proptest::option::of("[a-zA-Z ]{0,12}"),
        date_from in proptest::option::of(0i64..NOW),
        date_to in proptest::option::of(0i64..NOW),
        recent in proptest::option::of("[a-z_]{0,12}"),
    ) {
        let filter = TripFilter { limit, sort, search_string: search, date_from, date_to, recent };
        let tz = ReportTimezone::utc();
        prop_assert_eq!(build_plan(&filter, &tz, NOW), build_plan(&filter, &tz, NOW));
    }

    #[test]
    fn resolved_limit_is_always_positive_and_bounded(
        limit in proptest::option::of(any::<i64>()),
    ) {
        let plan = utc_plan(TripFilter { limit, ..TripFilter::default() });
        prop_assert!(plan.limit > 0);
        match limit {
            Some(n) if n > 0 => prop_assert_eq!(plan.limit, n),
            Some(-1) => prop_assert_eq!(plan.limit, WIDE_PAGE_SIZE),
            _ => prop_assert_eq!(plan.limit, DEFAULT_PAGE_SIZE),
        }
    }

    #[test]
    fn any_nonblank_search_forces_chronological_order(
        search in "[a-z]{1,10}",
        sort in proptest::option::of("[a-z_]{0,12}"),
    ) {
        let plan = utc_plan(TripFilter {
            search_string: Some(search),
            sort,
            ..TripFilter::default()
        });
        prop_assert_eq!(plan.order, SortOrder::TripDateAsc);
    }

    #[test]
    fn recent_windows_never_set_an_upper_bound(
        recent in proptest::option::of("[a-z_7]{0,12}"),
    ) {
        let plan = utc_plan(TripFilter { recent, ..TripFilter::default() });
        prop_assert_eq!(plan.date_to, None);
        if let Some(from) = plan.date_from {
            prop_assert!(from <= NOW);
        }
    }
}
