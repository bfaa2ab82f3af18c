// Trip model with validation
//
// A trip is one journey between two endpoint labels with a fare and an
// occurrence date. The occurrence date (`trip_date`) is distinct from the
// audit timestamps; all three are integer epoch-milliseconds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

// DECIMAL(12,2) column; anything at or above this cannot be stored.
const MAX_FARE: i64 = 10_000_000_000;
const MAX_LABEL_LEN: usize = 255;

/// One logged journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique trip ID (UUID), assigned at creation, immutable
    pub id: String,

    /// Journey origin label
    pub start_point: String,

    /// Journey destination label
    pub end_point: String,

    /// Fare amount, non-negative
    pub fare: Decimal,

    /// When the trip occurred, epoch-millis
    pub trip_date: i64,

    /// Optional vehicle identifier
    pub number_plate: Option<String>,

    /// Whether this entry is the return leg
    pub return_trip: bool,

    /// When the record was created, epoch-millis
    pub created_at: i64,

    /// When the record was last mutated, epoch-millis.
    /// Invariant: `updated_at >= created_at`.
    pub updated_at: i64,
}

/// Body of `POST /trip/add`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub start_point: String,
    pub end_point: String,
    pub fare: Decimal,
    pub trip_date: i64,
    #[serde(default)]
    pub number_plate: Option<String>,
    #[serde(default)]
    pub return_trip: bool,
}

/// Body of `PUT /trip/edit/{id}`.
///
/// Only these five fields are mutable; `number_plate` is set at creation
/// and never edited.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    pub start_point: String,
    pub end_point: String,
    pub fare: Decimal,
    pub trip_date: i64,
    #[serde(default)]
    pub return_trip: bool,
}

impl Trip {
    /// Create a new trip with validation.
    ///
    /// Both audit timestamps are set to `now_ms`, so a freshly created
    /// record always has `created_at == updated_at`.
    pub fn new(request: CreateTripRequest, now_ms: i64) -> Result<Self> {
        validate_label("startPoint", &request.start_point)?;
        validate_label("endPoint", &request.end_point)?;
        validate_fare(request.fare)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            start_point: request.start_point,
            end_point: request.end_point,
            fare: request.fare,
            trip_date: request.trip_date,
            number_plate: request
                .number_plate
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            return_trip: request.return_trip,
            created_at: now_ms,
            updated_at: now_ms,
        })
    }

    /// Apply an edit to the mutable fields.
    ///
    /// `updated_at` is always bumped past its previous value, even when two
    /// edits land within the same millisecond, so edit recency stays a
    /// strict order. `id` and `created_at` never change.
    pub fn apply_update(&mut self, request: UpdateTripRequest, now_ms: i64) -> Result<()> {
        validate_label("startPoint", &request.start_point)?;
        validate_label("endPoint", &request.end_point)?;
        validate_fare(request.fare)?;

        self.start_point = request.start_point;
        self.end_point = request.end_point;
        self.fare = request.fare;
        self.trip_date = request.trip_date;
        self.return_trip = request.return_trip;
        self.updated_at = if now_ms > self.updated_at {
            now_ms
        } else {
            self.updated_at + 1
        };

        Ok(())
    }
}

fn validate_label(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} cannot be empty", field)));
    }
    if value.len() > MAX_LABEL_LEN {
        return Err(AppError::validation(format!(
            "{} cannot exceed {} characters",
            field, MAX_LABEL_LEN
        )));
    }
    Ok(())
}

fn validate_fare(fare: Decimal) -> Result<()> {
    if fare < Decimal::ZERO {
        return Err(AppError::validation("fare cannot be negative"));
    }
    if fare >= Decimal::from(MAX_FARE) {
        return Err(AppError::validation("fare is too large"));
    }
    Ok(())
}
