use rust_decimal::Decimal;
use serde::Serialize;

/// Month-to-date statistics. Revenue and average fare are presented as
/// whole currency units; rounding happens only here, never while the sums
/// accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub total_revenue: i64,
    pub total_trips: i64,
    pub avg_fare: i64,
}

impl MonthStats {
    pub fn zero() -> Self {
        Self {
            total_revenue: 0,
            total_trips: 0,
            avg_fare: 0,
        }
    }
}

/// One calendar day of the last-7-days series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    /// Local calendar day, `YYYY-MM-DD`.
    pub day: String,
    pub total_revenue: Decimal,
    pub total_trips: i64,
    /// Most recent trip date inside this day, epoch-millis.
    pub last_trip_date: i64,
}

/// One bucket of the annual revenue histogram. Months are indexed 1-12.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month: u32,
    pub total_revenue: Decimal,
}

/// Everything the dashboard endpoint returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month_stats: MonthStats,
    /// Sunday-to-date revenue for the current week, whole units.
    pub week_revenue: i64,
    /// Up to 7 most recent active days, ascending by day.
    pub last_7_days: Vec<DayBucket>,
    /// 12 entries, January through December of the current year,
    /// zero-filled for months with no trips.
    pub monthly_totals: Vec<MonthlyTotal>,
}
