// MySQL persistence for trips: CRUD, the filtered fetch, and the grouping
// primitives the dashboard aggregates over.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::trips::models::Trip;
use crate::modules::trips::services::query_builder::{QueryPlan, SortOrder};

/// Revenue and row count over a time window.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FareTotals {
    pub revenue: Decimal,
    pub trips: i64,
}

impl FareTotals {
    pub fn zero() -> Self {
        Self {
            revenue: Decimal::ZERO,
            trips: 0,
        }
    }
}

/// Per-calendar-day revenue bucket as returned by the store.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DayTotalsRow {
    /// Days since epoch in the report timezone.
    pub day_index: i64,
    pub revenue: Decimal,
    pub trips: i64,
    /// Most recent `trip_date` inside the bucket, epoch-millis.
    pub last_trip_date: i64,
}

/// A trip date and its fare, for in-process bucketing.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DatedFare {
    pub trip_date: i64,
    pub fare: Decimal,
}

/// Persistence seam for trips.
///
/// Every query and mutation goes through this trait so the services can be
/// exercised against an in-memory double in tests.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Persist a freshly created trip.
    async fn insert(&self, trip: &Trip) -> Result<()>;

    /// Fetch one trip, `None` when the id is unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Trip>>;

    /// Write back an edited trip. `false` when the id no longer exists.
    async fn update(&self, trip: &Trip) -> Result<bool>;

    /// Hard-delete. `false` when the id no longer exists.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Run a resolved query plan: filters AND'd, search OR'd across the
    /// two endpoint labels, one sort order, row cap applied.
    async fn fetch(&self, plan: &QueryPlan) -> Result<Vec<Trip>>;

    /// Revenue sum and trip count for `trip_date` in `[from_ms, to_ms]`.
    async fn fare_totals_between(&self, from_ms: i64, to_ms: i64) -> Result<FareTotals>;

    /// The `days` most recent per-calendar-day buckets, newest first by
    /// last trip date. `offset_ms` shifts epoch-millis into the report
    /// timezone before the day split.
    async fn recent_day_buckets(&self, offset_ms: i64, days: i64) -> Result<Vec<DayTotalsRow>>;

    /// All `(trip_date, fare)` pairs with `trip_date` in `[from_ms, to_ms]`.
    async fn fares_between(&self, from_ms: i64, to_ms: i64) -> Result<Vec<DatedFare>>;
}

/// MySQL-backed trip store
pub struct MySqlTripStore {
    pool: MySqlPool,
}

impl MySqlTripStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const TRIP_COLUMNS: &str = "id, start_point, end_point, fare, trip_date, \
                            number_plate, return_trip, created_at, updated_at";

#[async_trait]
impl TripStore for MySqlTripStore {
    async fn insert(&self, trip: &Trip) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trips (
                id, start_point, end_point, fare, trip_date,
                number_plate, return_trip, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&trip.id)
        .bind(&trip.start_point)
        .bind(&trip.end_point)
        .bind(trip.fare)
        .bind(trip.trip_date)
        .bind(&trip.number_plate)
        .bind(trip.return_trip)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Trip>> {
        let sql = format!("SELECT {} FROM trips WHERE id = ?", TRIP_COLUMNS);
        let trip = sqlx::query_as::<_, Trip>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    async fn update(&self, trip: &Trip) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE trips
            SET start_point = ?, end_point = ?, fare = ?, trip_date = ?,
                return_trip = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&trip.start_point)
        .bind(&trip.end_point)
        .bind(trip.fare)
        .bind(trip.trip_date)
        .bind(trip.return_trip)
        .bind(trip.updated_at)
        .bind(&trip.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch(&self, plan: &QueryPlan) -> Result<Vec<Trip>> {
        let mut query: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM trips WHERE 1 = 1", TRIP_COLUMNS));

        if let Some(search) = &plan.search {
            let pattern = format!("%{}%", escape_like(search));
            query
                .push(" AND (LOWER(start_point) LIKE LOWER(")
                .push_bind(pattern.clone())
                .push(") OR LOWER(end_point) LIKE LOWER(")
                .push_bind(pattern)
                .push("))");
        }

        if let Some(from) = plan.date_from {
            query.push(" AND trip_date >= ").push_bind(from);
        }

        if let Some(to) = plan.date_to {
            query.push(" AND trip_date <= ").push_bind(to);
        }

        query.push(match plan.order {
            SortOrder::TripDateAsc => " ORDER BY trip_date ASC",
            SortOrder::TripDateDesc => " ORDER BY trip_date DESC",
            SortOrder::UpdatedDesc => " ORDER BY updated_at DESC",
            SortOrder::CreatedDesc => " ORDER BY created_at DESC",
        });

        query.push(" LIMIT ").push_bind(plan.limit);

        let trips = query
            .build_query_as::<Trip>()
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }

    async fn fare_totals_between(&self, from_ms: i64, to_ms: i64) -> Result<FareTotals> {
        let (revenue, trips): (Option<Decimal>, i64) = sqlx::query_as(
            "SELECT SUM(fare), COUNT(*) FROM trips WHERE trip_date BETWEEN ? AND ?",
        )
        .bind(from_ms)
        .bind(to_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(FareTotals {
            revenue: revenue.unwrap_or(Decimal::ZERO),
            trips,
        })
    }

    async fn recent_day_buckets(&self, offset_ms: i64, days: i64) -> Result<Vec<DayTotalsRow>> {
        // Shifting by the timezone offset before integer division splits
        // rows on local midnight.
        let rows = sqlx::query_as::<_, DayTotalsRow>(
            r#"
            SELECT (trip_date + ?) DIV 86400000 AS day_index,
                   SUM(fare) AS revenue,
                   COUNT(*) AS trips,
                   MAX(trip_date) AS last_trip_date
            FROM trips
            GROUP BY day_index
            ORDER BY last_trip_date DESC
            LIMIT ?
            "#,
        )
        .bind(offset_ms)
        .bind(days)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fares_between(&self, from_ms: i64, to_ms: i64) -> Result<Vec<DatedFare>> {
        let rows = sqlx::query_as::<_, DatedFare>(
            "SELECT trip_date, fare FROM trips WHERE trip_date BETWEEN ? AND ?",
        )
        .bind(from_ms)
        .bind(to_ms)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Escape `%`, `_` and the escape character itself so user input matches
/// literally inside a LIKE pattern.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
