// Dashboard aggregation: month-to-date stats, week-to-date revenue, the
// last-7-active-days series, and the annual monthly histogram.
//
// The store hands back raw sums and buckets; the calendar arithmetic and
// presentation rounding live here so every window uses the one configured
// report timezone.

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::core::timezone::{now_millis, ReportTimezone};
use crate::core::Result;
use crate::modules::dashboard::models::{DashboardSummary, DayBucket, MonthStats, MonthlyTotal};
use crate::modules::trips::repositories::{DatedFare, DayTotalsRow, FareTotals, TripStore};

const DAY_SERIES_LEN: i64 = 7;
const MONTHS_PER_YEAR: u32 = 12;

/// Computes the dashboard summary for "now".
pub struct DashboardService {
    store: Arc<dyn TripStore>,
    tz: ReportTimezone,
}

impl DashboardService {
    pub fn new(store: Arc<dyn TripStore>, tz: ReportTimezone) -> Self {
        Self { store, tz }
    }

    /// Aggregate all four statistic groups. An empty store yields all-zero
    /// statistics; store faults propagate and no partial summary is
    /// returned.
    pub async fn summary(&self) -> Result<DashboardSummary> {
        let now = now_millis();

        let (month_from, month_to) = self.tz.month_bounds(now);
        let month_totals = self.store.fare_totals_between(month_from, month_to).await?;

        let (week_from, week_to) = self.tz.week_bounds(now);
        let week_totals = self.store.fare_totals_between(week_from, week_to).await?;

        let day_rows = self
            .store
            .recent_day_buckets(self.tz.offset_ms(), DAY_SERIES_LEN)
            .await?;

        let (year_from, year_to) = self.tz.year_bounds(now);
        let year_fares = self.store.fares_between(year_from, year_to).await?;

        debug!(
            month_trips = month_totals.trips,
            active_days = day_rows.len(),
            year_rows = year_fares.len(),
            "dashboard aggregated"
        );

        Ok(DashboardSummary {
            month_stats: month_stats(&month_totals),
            week_revenue: round_to_unit(week_totals.revenue),
            last_7_days: day_series(day_rows, &self.tz),
            monthly_totals: monthly_histogram(&year_fares, &self.tz),
        })
    }
}

/// Round an accumulated sum to whole currency units, half away from zero.
pub fn round_to_unit(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Month-to-date stats from raw totals. The average is guarded: a month
/// with no trips reports zero, not a division error.
pub fn month_stats(totals: &FareTotals) -> MonthStats {
    let avg_fare = if totals.trips == 0 {
        0
    } else {
        round_to_unit(totals.revenue / Decimal::from(totals.trips))
    };

    MonthStats {
        total_revenue: round_to_unit(totals.revenue),
        total_trips: totals.trips,
        avg_fare,
    }
}

/// Store rows arrive newest-first by last trip date; the series is
/// re-sorted ascending by calendar day for display.
pub fn day_series(mut rows: Vec<DayTotalsRow>, tz: &ReportTimezone) -> Vec<DayBucket> {
    rows.sort_by_key(|r| r.day_index);
    rows.into_iter()
        .map(|r| DayBucket {
            day: tz.date_of_day_index(r.day_index).format("%Y-%m-%d").to_string(),
            total_revenue: r.revenue,
            total_trips: r.trips,
            last_trip_date: r.last_trip_date,
        })
        .collect()
}

/// Fold a year of `(trip_date, fare)` pairs into 12 monthly revenue
/// buckets, zero-filled, January first.
pub fn monthly_histogram(fares: &[DatedFare], tz: &ReportTimezone) -> Vec<MonthlyTotal> {
    let mut sums = [Decimal::ZERO; MONTHS_PER_YEAR as usize];
    for entry in fares {
        let month = tz.month_of(entry.trip_date);
        sums[(month - 1) as usize] += entry.fare;
    }

    sums.iter()
        .enumerate()
        .map(|(i, total)| MonthlyTotal {
            month: i as u32 + 1,
            total_revenue: *total,
        })
        .collect()
}
