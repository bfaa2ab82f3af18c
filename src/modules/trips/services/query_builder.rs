// Turns a loose TripFilter into a concrete, deterministic store query:
// normalized date bounds, a single sort order, and a row cap.

use crate::core::timezone::{ReportTimezone, MS_PER_DAY};
use crate::modules::trips::models::TripFilter;

/// Row cap when the filter does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Row cap for the `limit = -1` wide page (monthly report export).
pub const WIDE_PAGE_SIZE: i64 = 500;

/// The one sort order a query runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    TripDateAsc,
    TripDateDesc,
    UpdatedDesc,
    CreatedDesc,
}

/// A fully resolved query: what the store executes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Substring matched case-insensitively against either endpoint label.
    pub search: Option<String>,
    /// Inclusive lower bound on `trip_date`, epoch-millis.
    pub date_from: Option<i64>,
    /// Inclusive upper bound on `trip_date`, epoch-millis.
    pub date_to: Option<i64>,
    pub order: SortOrder,
    pub limit: i64,
}

/// Build the plan for a filter, given the report timezone and the current
/// instant. Pure: the same inputs always produce the same plan.
///
/// Sort precedence: a search term or an explicit date bound forces
/// `trip_date` ascending so filtered result sets read chronologically,
/// regardless of the requested sort. A `recent` window alone does not
/// override the requested sort.
pub fn build_plan(filter: &TripFilter, tz: &ReportTimezone, now_ms: i64) -> QueryPlan {
    let search = filter
        .search_string
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let order = if search.is_some() || filter.date_from.is_some() || filter.date_to.is_some() {
        SortOrder::TripDateAsc
    } else {
        match filter.sort.as_deref() {
            Some("updated") => SortOrder::UpdatedDesc,
            Some("tripdate") => SortOrder::TripDateDesc,
            _ => SortOrder::CreatedDesc,
        }
    };

    // Explicit bounds snap to whole local calendar days.
    let mut date_from = filter.date_from.map(|ms| tz.day_start(ms));
    let mut date_to = filter.date_to.map(|ms| tz.day_end(ms));

    // The recent shorthand only applies when no explicit bound is given,
    // and only ever narrows from below.
    if filter.date_from.is_none() && filter.date_to.is_none() {
        date_from = match filter.recent.as_deref() {
            Some("today") => Some(tz.day_start(now_ms)),
            Some("last_7_days") => Some(now_ms - 7 * MS_PER_DAY),
            Some("month") => Some(now_ms - 30 * MS_PER_DAY),
            _ => None,
        };
        date_to = None;
    }

    let limit = match filter.limit {
        Some(-1) => WIDE_PAGE_SIZE,
        Some(n) if n > 0 => n,
        _ => DEFAULT_PAGE_SIZE,
    };

    QueryPlan {
        search,
        date_from,
        date_to,
        order,
        limit,
    }
}
